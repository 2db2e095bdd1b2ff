//! Show listing DTOs and the upcoming/past partitioning logic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{ArtistId, ShowId, VenueId};

/// A show resolved with venue and artist display data, as rendered on the
/// shows listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowListing {
    pub show_id: ShowId,
    pub venue_id: VenueId,
    pub venue_name: String,
    pub venue_image_link: String,
    pub artist_id: ArtistId,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: DateTime<Utc>,
}

/// Shows split around an evaluation instant, with counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowPartition<T> {
    pub past_shows: Vec<T>,
    pub upcoming_shows: Vec<T>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Split `shows` into past (`start_time < now`) and upcoming
/// (`start_time > now`) buckets.
///
/// Both comparisons are strict: a show starting exactly at `now` appears in
/// neither bucket, so the two counts can sum to less than the input length.
/// This mirrors the listing behavior the directory has always had and is
/// relied upon by callers.
pub fn partition_shows<T>(
    shows: Vec<T>,
    now: DateTime<Utc>,
    start_time: impl Fn(&T) -> DateTime<Utc>,
) -> ShowPartition<T> {
    let mut past_shows = Vec::new();
    let mut upcoming_shows = Vec::new();

    for show in shows {
        let start = start_time(&show);
        if start < now {
            past_shows.push(show);
        } else if start > now {
            upcoming_shows.push(show);
        }
        // start == now: excluded from both buckets
    }

    ShowPartition {
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn eval_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 20, 0, 0).unwrap()
    }

    #[test]
    fn test_partition_before_and_after() {
        let now = eval_instant();
        let shows = vec![now - Duration::hours(2), now + Duration::hours(2)];
        let partition = partition_shows(shows, now, |t| *t);

        assert_eq!(partition.past_shows, vec![now - Duration::hours(2)]);
        assert_eq!(partition.upcoming_shows, vec![now + Duration::hours(2)]);
        assert_eq!(partition.past_shows_count, 1);
        assert_eq!(partition.upcoming_shows_count, 1);
    }

    #[test]
    fn test_partition_excludes_exact_instant() {
        let now = eval_instant();
        let shows = vec![now - Duration::hours(1), now, now + Duration::hours(1)];
        let partition = partition_shows(shows, now, |t| *t);

        assert_eq!(partition.past_shows_count, 1);
        assert_eq!(partition.upcoming_shows_count, 1);
        // The equal-time show is in neither bucket.
        assert!(partition.past_shows_count + partition.upcoming_shows_count < 3);
    }

    #[test]
    fn test_partition_empty() {
        let partition = partition_shows(Vec::<DateTime<Utc>>::new(), eval_instant(), |t| *t);
        assert!(partition.past_shows.is_empty());
        assert!(partition.upcoming_shows.is_empty());
        assert_eq!(partition.past_shows_count, 0);
        assert_eq!(partition.upcoming_shows_count, 0);
    }

    #[test]
    fn test_partition_preserves_input_order() {
        let now = eval_instant();
        let shows = vec![
            now + Duration::hours(3),
            now + Duration::hours(1),
            now + Duration::hours(2),
        ];
        let partition = partition_shows(shows.clone(), now, |t| *t);
        assert_eq!(partition.upcoming_shows, shows);
    }
}
