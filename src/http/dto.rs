//! Data Transfer Objects for the HTTP API.
//!
//! Request bodies map onto the domain's `New*` input types explicitly, field
//! by field. Every field takes a serde default so that a missing field flows
//! into the core's validation (and is rejected there) rather than failing at
//! deserialization, matching how blank form submissions behave.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{ArtistId, VenueId};
use crate::models::{NewArtist, NewShow, NewVenue};

// Re-export the view DTOs that handlers return; they already derive
// Serialize/Deserialize.
pub use crate::api::{
    AreaVenues, ArtistPage, ArtistSearchResults, RecentListings, ShowListing, VenuePage,
    VenueSearchResults,
};

/// Request body for creating or updating a venue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VenueRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub image_link: String,
    #[serde(default)]
    pub facebook_link: String,
    #[serde(default)]
    pub website_link: String,
    #[serde(default)]
    pub seeking_talent: bool,
    #[serde(default)]
    pub seeking_description: Option<String>,
}

impl VenueRequest {
    /// Explicit field-by-field mapping into the domain input type.
    pub fn into_new_venue(self) -> NewVenue {
        NewVenue {
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone,
            genres: self.genres,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website_link: self.website_link,
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description,
        }
    }
}

/// Request body for creating or updating an artist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtistRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub image_link: String,
    #[serde(default)]
    pub facebook_link: String,
    #[serde(default)]
    pub website_link: String,
    #[serde(default)]
    pub seeking_venue: bool,
    #[serde(default)]
    pub seeking_description: Option<String>,
}

impl ArtistRequest {
    /// Explicit field-by-field mapping into the domain input type.
    pub fn into_new_artist(self) -> NewArtist {
        NewArtist {
            name: self.name,
            city: self.city,
            state: self.state,
            phone: self.phone,
            genres: self.genres,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website_link: self.website_link,
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description,
        }
    }
}

/// Request body for creating a show. The timestamp arrives as RFC 3339 text
/// and is rejected before the core is reached when malformed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowRequest {
    #[serde(default)]
    pub venue_id: i64,
    #[serde(default)]
    pub artist_id: i64,
    #[serde(default)]
    pub start_time: String,
}

impl ShowRequest {
    /// Parse into the domain input type.
    ///
    /// # Returns
    /// * `Ok(NewShow)` with a well-formed timestamp
    /// * `Err(String)` describing the malformed `start_time`
    pub fn into_new_show(self) -> Result<NewShow, String> {
        let start_time = DateTime::parse_from_rfc3339(&self.start_time)
            .map_err(|e| format!("malformed start_time '{}': {}", self.start_time, e))?
            .with_timezone(&Utc);
        Ok(NewShow {
            venue_id: VenueId::new(self.venue_id),
            artist_id: ArtistId::new(self.artist_id),
            start_time,
        })
    }
}

/// Request body for the search endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub search_term: String,
}

/// Response for a successful mutation, carrying the entity's name for user
/// feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationNotice {
    /// Name of the affected entity
    pub name: String,
    /// Message about the operation
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}
