//! Artist view DTOs: search results and the detail page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{ArtistId, VenueId};
use crate::models::Artist;
use crate::routes::shows::ShowPartition;

/// A show on an artist page, resolved with the hosting venue's display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistShow {
    pub venue_id: VenueId,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: DateTime<Utc>,
}

/// Artist name search response: the matching rows and their count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistSearchResults {
    pub count: usize,
    pub data: Vec<Artist>,
}

/// The artist detail page: entity fields plus partitioned shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistPage {
    pub id: ArtistId,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website_link: String,
    pub image_link: String,
    pub facebook_link: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl ArtistPage {
    pub fn new(artist: Artist, shows: ShowPartition<ArtistShow>) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
            genres: artist.genres,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website_link: artist.website_link,
            image_link: artist.image_link,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            past_shows: shows.past_shows,
            upcoming_shows: shows.upcoming_shows,
            past_shows_count: shows.past_shows_count,
            upcoming_shows_count: shows.upcoming_shows_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_artist_page_carries_counts() {
        let artist = Artist {
            id: ArtistId::new(4),
            name: "The Wild Sax Band".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: "432-325-5432".to_string(),
            genres: vec!["Jazz".to_string(), "Classical".to_string()],
            image_link: String::new(),
            facebook_link: String::new(),
            website_link: String::new(),
            seeking_venue: false,
            seeking_description: None,
        };
        let start = Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap();
        let shows = ShowPartition {
            past_shows: vec![],
            upcoming_shows: vec![ArtistShow {
                venue_id: VenueId::new(3),
                venue_name: "Park Square Live Music & Coffee".to_string(),
                venue_image_link: String::new(),
                start_time: start,
            }],
            past_shows_count: 0,
            upcoming_shows_count: 1,
        };

        let page = ArtistPage::new(artist, shows);
        assert_eq!(page.name, "The Wild Sax Band");
        assert_eq!(page.upcoming_shows_count, 1);
        assert!(page.past_shows.is_empty());
    }
}
