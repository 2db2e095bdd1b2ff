//! Repository traits: the abstract interface over the datastore.
//!
//! The traits are split per entity so implementations and tests can depend on
//! the slice they need; `FullRepository` is the combined surface the service
//! layer works against.
//!
//! # Thread Safety
//! Implementations must be `Send + Sync` to work with async Rust.

pub mod error;

use async_trait::async_trait;

use crate::api::{ArtistId, VenueId};
use crate::models::{Artist, NewArtist, NewShow, NewVenue, Show, Venue};
use crate::routes::{ArtistShow, ShowListing, VenueShow};

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

/// Repository trait for venue operations.
#[async_trait]
pub trait VenueRepository: Send + Sync {
    /// List every venue, ordered by ascending id.
    async fn list_venues(&self) -> RepositoryResult<Vec<Venue>>;

    /// The `limit` most recently created venues, ordered by descending id.
    ///
    /// Ids are assigned monotonically, so descending id order is creation
    /// order newest-first.
    async fn list_recent_venues(&self, limit: i64) -> RepositoryResult<Vec<Venue>>;

    /// Every distinct `(city, state)` pair across all venues, each exactly
    /// once. No ordering is guaranteed.
    async fn distinct_locations(&self) -> RepositoryResult<Vec<(String, String)>>;

    /// All venues matching an exact `(city, state)` pair.
    async fn venues_by_location(&self, city: &str, state: &str) -> RepositoryResult<Vec<Venue>>;

    /// Case-insensitive substring match on the venue name.
    ///
    /// Matching uses Unicode case folding, not byte-wise ASCII folding. An
    /// empty term matches every row.
    async fn search_venues_by_name(&self, term: &str) -> RepositoryResult<Vec<Venue>>;

    /// Fetch a venue by id.
    ///
    /// # Returns
    /// * `Ok(Venue)` - The matching row
    /// * `Err(RepositoryError::NotFound)` - If no venue has this id
    async fn get_venue(&self, id: VenueId) -> RepositoryResult<Venue>;

    /// Persist a new venue inside a transaction and return it with its
    /// assigned id. Input is assumed validated.
    async fn create_venue(&self, venue: &NewVenue) -> RepositoryResult<Venue>;

    /// Replace an existing venue's fields inside a transaction.
    ///
    /// # Returns
    /// * `Ok(Venue)` - The updated row
    /// * `Err(RepositoryError::NotFound)` - If no venue has this id
    async fn update_venue(&self, id: VenueId, venue: &NewVenue) -> RepositoryResult<Venue>;

    /// Delete a venue inside a transaction and return the deleted row.
    ///
    /// Deletion is blocked while dependent shows exist.
    ///
    /// # Returns
    /// * `Ok(Venue)` - The deleted row
    /// * `Err(RepositoryError::NotFound)` - If no venue has this id
    /// * `Err(RepositoryError::ConflictError)` - If the venue still has shows
    async fn delete_venue(&self, id: VenueId) -> RepositoryResult<Venue>;
}

/// Repository trait for artist operations.
///
/// Artists expose no delete; the directory only creates and edits them.
#[async_trait]
pub trait ArtistRepository: Send + Sync {
    /// List every artist, ordered by ascending id.
    async fn list_artists(&self) -> RepositoryResult<Vec<Artist>>;

    /// The `limit` most recently created artists, ordered by descending id.
    async fn list_recent_artists(&self, limit: i64) -> RepositoryResult<Vec<Artist>>;

    /// Case-insensitive substring match on the artist name.
    async fn search_artists_by_name(&self, term: &str) -> RepositoryResult<Vec<Artist>>;

    /// Fetch an artist by id, or `NotFound`.
    async fn get_artist(&self, id: ArtistId) -> RepositoryResult<Artist>;

    /// Persist a new artist inside a transaction and return it with its
    /// assigned id. Input is assumed validated.
    async fn create_artist(&self, artist: &NewArtist) -> RepositoryResult<Artist>;

    /// Replace an existing artist's fields inside a transaction, or `NotFound`.
    async fn update_artist(&self, id: ArtistId, artist: &NewArtist) -> RepositoryResult<Artist>;
}

/// Repository trait for show operations.
///
/// Shows are created and listed, never updated or deleted.
#[async_trait]
pub trait ShowRepository: Send + Sync {
    /// Every show, resolved with the venue's and artist's name and image.
    async fn list_shows(&self) -> RepositoryResult<Vec<ShowListing>>;

    /// A venue's shows, each resolved with the performing artist's display
    /// data. An unknown venue id yields an empty list, matching a join over
    /// a nonexistent key.
    async fn shows_for_venue(&self, venue_id: VenueId) -> RepositoryResult<Vec<VenueShow>>;

    /// An artist's shows, each resolved with the hosting venue's display data.
    async fn shows_for_artist(&self, artist_id: ArtistId) -> RepositoryResult<Vec<ArtistShow>>;

    /// Persist a new show inside a transaction.
    ///
    /// # Returns
    /// * `Ok(Show)` - The persisted row with its assigned id
    /// * `Err(RepositoryError::ForeignKeyViolation)` - If `venue_id` or
    ///   `artist_id` references no existing row at commit time
    async fn create_show(&self, show: &NewShow) -> RepositoryResult<Show>;
}

/// Combined repository surface used by the service layer.
#[async_trait]
pub trait FullRepository: VenueRepository + ArtistRepository + ShowRepository {
    /// Check that the backing datastore is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
