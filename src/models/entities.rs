//! Domain entities and their validation rules.
//!
//! The persisted entities (`Venue`, `Artist`, `Show`) carry database-assigned
//! identifiers; the `New*` companions are the validated inputs accepted by the
//! mutation operations. Mapping from request payloads into `New*` values is
//! explicit, field by field, at the HTTP boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{ArtistId, ShowId, VenueId};

/// A location that can host shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// A performer that can be booked for shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// A scheduled booking linking one venue and one artist at a start time.
///
/// A show is a join entity: it has no meaning without both references, and
/// referential integrity is enforced by the datastore at commit time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub id: ShowId,
    pub venue_id: VenueId,
    pub artist_id: ArtistId,
    pub start_time: DateTime<Utc>,
}

/// Input for creating or updating a venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Input for creating or updating an artist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Input for creating a show. Shows are never updated or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewShow {
    pub venue_id: VenueId,
    pub artist_id: ArtistId,
    pub start_time: DateTime<Utc>,
}

fn require(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("missing required field '{}'", field))
    } else {
        Ok(())
    }
}

impl NewVenue {
    /// Check the required fields (`name`, `city`, `state`).
    ///
    /// Runs before the datastore is touched; a failure here means the
    /// mutation is rejected without opening a transaction.
    pub fn validate(&self) -> Result<(), String> {
        require("name", &self.name)?;
        require("city", &self.city)?;
        require("state", &self.state)?;
        Ok(())
    }

    /// Persisted venue with the given id and these fields.
    pub fn into_venue(self, id: VenueId) -> Venue {
        Venue {
            id,
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

impl NewArtist {
    /// Check the required fields (`name`, `city`, `state`).
    pub fn validate(&self) -> Result<(), String> {
        require("name", &self.name)?;
        require("city", &self.city)?;
        require("state", &self.state)?;
        Ok(())
    }

    /// Persisted artist with the given id and these fields.
    pub fn into_artist(self, id: ArtistId) -> Artist {
        Artist {
            id,
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
