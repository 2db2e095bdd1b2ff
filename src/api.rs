//! Public API surface for the booking directory backend.
//!
//! This file consolidates the identifier newtypes and re-exports the DTO
//! types used by the HTTP API. All types derive Serialize/Deserialize for
//! JSON serialization.

pub use crate::routes::artists::ArtistPage;
pub use crate::routes::artists::ArtistSearchResults;
pub use crate::routes::artists::ArtistShow;
pub use crate::routes::landing::RecentListings;
pub use crate::routes::shows::ShowListing;
pub use crate::routes::shows::ShowPartition;
pub use crate::routes::venues::AreaVenues;
pub use crate::routes::venues::VenuePage;
pub use crate::routes::venues::VenueSearchResults;
pub use crate::routes::venues::VenueShow;
pub use crate::routes::venues::VenueSummary;

pub use crate::models::{Artist, NewArtist, NewShow, NewVenue, Show, Venue};

use serde::{Deserialize, Serialize};

/// Venue identifier (database primary key).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct VenueId(pub i64);

/// Artist identifier (database primary key).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ArtistId(pub i64);

/// Show identifier (database primary key).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ShowId(pub i64);

impl VenueId {
    pub fn new(value: i64) -> Self {
        VenueId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl ArtistId {
    pub fn new(value: i64) -> Self {
        ArtistId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl ShowId {
    pub fn new(value: i64) -> Self {
        ShowId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for VenueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for ArtistId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for ShowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<VenueId> for i64 {
    fn from(id: VenueId) -> Self {
        id.0
    }
}
impl From<ArtistId> for i64 {
    fn from(id: ArtistId) -> Self {
        id.0
    }
}
impl From<ShowId> for i64 {
    fn from(id: ShowId) -> Self {
        id.0
    }
}
