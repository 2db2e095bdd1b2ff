use serde::{Deserialize, Serialize};

use crate::models::{Artist, Venue};

/// Most recently listed artists and venues, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentListings {
    pub recent_artists: Vec<Artist>,
    pub recent_venues: Vec<Venue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_listings_empty() {
        let listings = RecentListings {
            recent_artists: vec![],
            recent_venues: vec![],
        };
        let cloned = listings.clone();
        assert!(cloned.recent_artists.is_empty());
        assert!(cloned.recent_venues.is_empty());
    }

    #[test]
    fn test_recent_listings_debug() {
        let listings = RecentListings {
            recent_artists: vec![],
            recent_venues: vec![],
        };
        let debug_str = format!("{:?}", listings);
        assert!(debug_str.contains("RecentListings"));
    }
}
