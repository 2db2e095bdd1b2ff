//! High-level service functions over the repository traits.
//!
//! These are the operations the HTTP layer calls. They validate input,
//! orchestrate repository queries, and run the aggregation logic; they work
//! with any repository implementation.

use crate::api::{
    AreaVenues, ArtistId, ArtistPage, ArtistSearchResults, RecentListings, ShowListing,
    VenueId, VenuePage, VenueSearchResults, VenueSummary,
};
use crate::db::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};
use crate::models::{Artist, Clock, NewArtist, NewShow, NewVenue, Show, Venue};
use crate::routes::partition_shows;

/// How many recently listed artists/venues the landing page shows.
pub const RECENT_LISTING_LIMIT: i64 = 10;

/// Landing page summary: the most recently listed artists and venues.
pub async fn landing_summary(repo: &dyn FullRepository) -> RepositoryResult<RecentListings> {
    let recent_artists = repo.list_recent_artists(RECENT_LISTING_LIMIT).await?;
    let recent_venues = repo.list_recent_venues(RECENT_LISTING_LIMIT).await?;
    Ok(RecentListings {
        recent_artists,
        recent_venues,
    })
}

/// Check that the backing datastore is reachable.
pub async fn health_check(repo: &dyn FullRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}

// =============================================================================
// Venues
// =============================================================================

/// All venues grouped by `(city, state)`, each venue annotated with its
/// upcoming-show count.
///
/// Deliberately computed the same way the directory always has: one query for
/// the distinct locations, one per location for its venues, one per venue for
/// its shows. Fine at directory scale; a joined query would be valid as long
/// as it produces identical output.
pub async fn venues_by_area(
    repo: &dyn FullRepository,
    clock: &dyn Clock,
) -> RepositoryResult<Vec<AreaVenues>> {
    let mut areas = Vec::new();
    for (city, state) in repo.distinct_locations().await? {
        let mut summaries = Vec::new();
        for venue in repo.venues_by_location(&city, &state).await? {
            let shows = repo.shows_for_venue(venue.id).await?;
            let partition = partition_shows(shows, clock.now(), |s| s.start_time);
            summaries.push(VenueSummary {
                id: venue.id,
                name: venue.name,
                num_upcoming_shows: partition.upcoming_shows_count,
            });
        }
        areas.push(AreaVenues {
            city,
            state,
            venues: summaries,
        });
    }
    Ok(areas)
}

/// Case-insensitive partial-match search over venue names.
pub async fn search_venues(
    repo: &dyn FullRepository,
    term: &str,
) -> RepositoryResult<VenueSearchResults> {
    let data = repo.search_venues_by_name(term).await?;
    Ok(VenueSearchResults {
        count: data.len(),
        data,
    })
}

/// The venue detail page: entity fields plus shows partitioned around the
/// clock's current instant.
pub async fn venue_page(
    repo: &dyn FullRepository,
    clock: &dyn Clock,
    id: VenueId,
) -> RepositoryResult<VenuePage> {
    let venue = repo.get_venue(id).await?;
    let shows = repo.shows_for_venue(id).await?;
    let partition = partition_shows(shows, clock.now(), |s| s.start_time);
    Ok(VenuePage::new(venue, partition))
}

/// Fetch a venue's raw fields, e.g. to populate an edit form.
pub async fn get_venue(repo: &dyn FullRepository, id: VenueId) -> RepositoryResult<Venue> {
    repo.get_venue(id).await
}

/// Validate and persist a new venue.
///
/// Validation failures never reach the datastore. On success the created
/// venue (with its assigned id) is returned; callers read its name for user
/// feedback.
pub async fn create_venue(
    repo: &dyn FullRepository,
    venue: NewVenue,
) -> RepositoryResult<Venue> {
    if let Err(reason) = venue.validate() {
        return Err(RepositoryError::validation_with_context(
            reason,
            ErrorContext::new("create_venue")
                .with_entity("venue")
                .with_details(venue.name.clone()),
        ));
    }

    repo.create_venue(&venue).await.map_err(|e| {
        log::warn!("venue '{}' could not be listed: {}", venue.name, e);
        e
    })
}

/// Validate and apply an update to an existing venue.
pub async fn update_venue(
    repo: &dyn FullRepository,
    id: VenueId,
    venue: NewVenue,
) -> RepositoryResult<Venue> {
    if let Err(reason) = venue.validate() {
        return Err(RepositoryError::validation_with_context(
            reason,
            ErrorContext::new("update_venue")
                .with_entity("venue")
                .with_entity_id(id)
                .with_details(venue.name.clone()),
        ));
    }

    repo.update_venue(id, &venue).await.map_err(|e| {
        if !e.is_not_found() {
            log::warn!("venue '{}' could not be updated: {}", venue.name, e);
        }
        e
    })
}

/// Delete a venue. Returns the deleted venue so callers can report its name.
///
/// Fails with `NotFound` for an unknown id and with `ConflictError` while
/// dependent shows exist.
pub async fn delete_venue(repo: &dyn FullRepository, id: VenueId) -> RepositoryResult<Venue> {
    repo.delete_venue(id).await.map_err(|e| {
        if !e.is_not_found() {
            log::warn!("venue {} could not be deleted: {}", id, e);
        }
        e
    })
}

// =============================================================================
// Artists
// =============================================================================

/// Every artist in the directory.
pub async fn list_artists(repo: &dyn FullRepository) -> RepositoryResult<Vec<Artist>> {
    repo.list_artists().await
}

/// Case-insensitive partial-match search over artist names.
pub async fn search_artists(
    repo: &dyn FullRepository,
    term: &str,
) -> RepositoryResult<ArtistSearchResults> {
    let data = repo.search_artists_by_name(term).await?;
    Ok(ArtistSearchResults {
        count: data.len(),
        data,
    })
}

/// The artist detail page: entity fields plus shows partitioned around the
/// clock's current instant.
pub async fn artist_page(
    repo: &dyn FullRepository,
    clock: &dyn Clock,
    id: ArtistId,
) -> RepositoryResult<ArtistPage> {
    let artist = repo.get_artist(id).await?;
    let shows = repo.shows_for_artist(id).await?;
    let partition = partition_shows(shows, clock.now(), |s| s.start_time);
    Ok(ArtistPage::new(artist, partition))
}

/// Fetch an artist's raw fields, e.g. to populate an edit form.
pub async fn get_artist(repo: &dyn FullRepository, id: ArtistId) -> RepositoryResult<Artist> {
    repo.get_artist(id).await
}

/// Validate and persist a new artist.
pub async fn create_artist(
    repo: &dyn FullRepository,
    artist: NewArtist,
) -> RepositoryResult<Artist> {
    if let Err(reason) = artist.validate() {
        return Err(RepositoryError::validation_with_context(
            reason,
            ErrorContext::new("create_artist")
                .with_entity("artist")
                .with_details(artist.name.clone()),
        ));
    }

    repo.create_artist(&artist).await.map_err(|e| {
        log::warn!("artist '{}' could not be listed: {}", artist.name, e);
        e
    })
}

/// Validate and apply an update to an existing artist.
pub async fn update_artist(
    repo: &dyn FullRepository,
    id: ArtistId,
    artist: NewArtist,
) -> RepositoryResult<Artist> {
    if let Err(reason) = artist.validate() {
        return Err(RepositoryError::validation_with_context(
            reason,
            ErrorContext::new("update_artist")
                .with_entity("artist")
                .with_entity_id(id)
                .with_details(artist.name.clone()),
        ));
    }

    repo.update_artist(id, &artist).await.map_err(|e| {
        if !e.is_not_found() {
            log::warn!("artist '{}' could not be updated: {}", artist.name, e);
        }
        e
    })
}

// =============================================================================
// Shows
// =============================================================================

/// Every show, resolved with venue and artist display data.
pub async fn list_shows(repo: &dyn FullRepository) -> RepositoryResult<Vec<ShowListing>> {
    repo.list_shows().await
}

/// Persist a new show.
///
/// Referential integrity is enforced by the datastore at commit time; a
/// dangling reference surfaces as `ForeignKeyViolation`.
pub async fn create_show(repo: &dyn FullRepository, show: NewShow) -> RepositoryResult<Show> {
    repo.create_show(&show).await.map_err(|e| {
        log::warn!(
            "show at venue {} for artist {} could not be listed: {}",
            show.venue_id,
            show.artist_id,
            e
        );
        e
    })
}
