//! Venue view DTOs: grouped listings, search results, and the detail page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{ArtistId, VenueId};
use crate::models::Venue;
use crate::routes::shows::ShowPartition;

/// A show on a venue page, resolved with the performing artist's display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueShow {
    pub artist_id: ArtistId,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: DateTime<Utc>,
}

/// One venue row inside a grouped area listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueSummary {
    pub id: VenueId,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// All venues of one `(city, state)` area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaVenues {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// Venue name search response: the matching rows and their count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueSearchResults {
    pub count: usize,
    pub data: Vec<Venue>,
}

/// The venue detail page: entity fields plus partitioned shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenuePage {
    pub id: VenueId,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub website_link: String,
    pub image_link: String,
    pub facebook_link: String,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl VenuePage {
    pub fn new(venue: Venue, shows: ShowPartition<VenueShow>) -> Self {
        Self {
            id: venue.id,
            name: venue.name,
            genres: venue.genres,
            city: venue.city,
            state: venue.state,
            address: venue.address,
            phone: venue.phone,
            website_link: venue.website_link,
            image_link: venue.image_link,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
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

    fn sample_venue() -> Venue {
        Venue {
            id: VenueId::new(1),
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: "123-123-1234".to_string(),
            genres: vec!["Jazz".to_string(), "Reggae".to_string()],
            image_link: String::new(),
            facebook_link: String::new(),
            website_link: String::new(),
            seeking_talent: true,
            seeking_description: Some("Looking for a local artist".to_string()),
        }
    }

    #[test]
    fn test_venue_page_carries_counts() {
        let start = Utc.with_ymd_and_hms(2024, 6, 15, 20, 0, 0).unwrap();
        let shows = ShowPartition {
            past_shows: vec![VenueShow {
                artist_id: ArtistId::new(9),
                artist_name: "Guns N Petals".to_string(),
                artist_image_link: String::new(),
                start_time: start,
            }],
            upcoming_shows: vec![],
            past_shows_count: 1,
            upcoming_shows_count: 0,
        };

        let page = VenuePage::new(sample_venue(), shows);
        assert_eq!(page.name, "The Musical Hop");
        assert_eq!(page.past_shows_count, 1);
        assert_eq!(page.upcoming_shows_count, 0);
        assert_eq!(page.past_shows[0].artist_name, "Guns N Petals");
    }

    #[test]
    fn test_area_venues_serializes() {
        let area = AreaVenues {
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            venues: vec![VenueSummary {
                id: VenueId::new(1),
                name: "The Musical Hop".to_string(),
                num_upcoming_shows: 2,
            }],
        };
        let json = serde_json::to_value(&area).unwrap();
        assert_eq!(json["city"], "San Francisco");
        assert_eq!(json["venues"][0]["num_upcoming_shows"], 2);
    }
}
