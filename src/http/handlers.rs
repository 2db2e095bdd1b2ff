//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic.

use axum::{
    extract::{Path, State},
    Json,
};

use super::dto::{
    AreaVenues, ArtistPage, ArtistRequest, ArtistSearchResults, HealthResponse, MutationNotice,
    RecentListings, SearchRequest, ShowListing, ShowRequest, VenuePage, VenueRequest,
    VenueSearchResults,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{ArtistId, VenueId};
use crate::db::services as db_services;
use crate::models::{Artist, Show, Venue};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and database is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Landing
// =============================================================================

/// GET /
///
/// The landing page summary: the ten most recently listed artists and venues.
pub async fn landing(State(state): State<AppState>) -> HandlerResult<RecentListings> {
    let listings = db_services::landing_summary(state.repository.as_ref()).await?;
    Ok(Json(listings))
}

// =============================================================================
// Venues
// =============================================================================

/// GET /v1/venues
///
/// All venues grouped by (city, state), each annotated with its
/// upcoming-show count.
pub async fn list_venues(State(state): State<AppState>) -> HandlerResult<Vec<AreaVenues>> {
    let areas =
        db_services::venues_by_area(state.repository.as_ref(), state.clock.as_ref()).await?;
    Ok(Json(areas))
}

/// POST /v1/venues/search
///
/// Case-insensitive partial-match search over venue names.
pub async fn search_venues(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> HandlerResult<VenueSearchResults> {
    let results =
        db_services::search_venues(state.repository.as_ref(), &request.search_term).await?;
    Ok(Json(results))
}

/// GET /v1/venues/{venue_id}
///
/// The venue detail page with upcoming and past shows.
pub async fn get_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<i64>,
) -> HandlerResult<VenuePage> {
    let page = db_services::venue_page(
        state.repository.as_ref(),
        state.clock.as_ref(),
        VenueId::new(venue_id),
    )
    .await?;
    Ok(Json(page))
}

/// POST /v1/venues
///
/// Create a new venue from a submitted form.
pub async fn create_venue(
    State(state): State<AppState>,
    Json(request): Json<VenueRequest>,
) -> HandlerResult<Venue> {
    let created =
        db_services::create_venue(state.repository.as_ref(), request.into_new_venue()).await?;
    Ok(Json(created))
}

/// PUT /v1/venues/{venue_id}
///
/// Update an existing venue from a submitted edit form.
pub async fn update_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<i64>,
    Json(request): Json<VenueRequest>,
) -> HandlerResult<Venue> {
    let updated = db_services::update_venue(
        state.repository.as_ref(),
        VenueId::new(venue_id),
        request.into_new_venue(),
    )
    .await?;
    Ok(Json(updated))
}

/// DELETE /v1/venues/{venue_id}
///
/// Delete a venue. Blocked while the venue still has shows.
pub async fn delete_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<i64>,
) -> HandlerResult<MutationNotice> {
    let deleted =
        db_services::delete_venue(state.repository.as_ref(), VenueId::new(venue_id)).await?;
    Ok(Json(MutationNotice {
        message: format!("Venue {} was deleted successfully", deleted.name),
        name: deleted.name,
    }))
}

// =============================================================================
// Artists
// =============================================================================

/// GET /v1/artists
///
/// Every artist in the directory.
pub async fn list_artists(State(state): State<AppState>) -> HandlerResult<Vec<Artist>> {
    let artists = db_services::list_artists(state.repository.as_ref()).await?;
    Ok(Json(artists))
}

/// POST /v1/artists/search
///
/// Case-insensitive partial-match search over artist names.
pub async fn search_artists(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> HandlerResult<ArtistSearchResults> {
    let results =
        db_services::search_artists(state.repository.as_ref(), &request.search_term).await?;
    Ok(Json(results))
}

/// GET /v1/artists/{artist_id}
///
/// The artist detail page with upcoming and past shows.
pub async fn get_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<i64>,
) -> HandlerResult<ArtistPage> {
    let page = db_services::artist_page(
        state.repository.as_ref(),
        state.clock.as_ref(),
        ArtistId::new(artist_id),
    )
    .await?;
    Ok(Json(page))
}

/// POST /v1/artists
///
/// Create a new artist from a submitted form.
pub async fn create_artist(
    State(state): State<AppState>,
    Json(request): Json<ArtistRequest>,
) -> HandlerResult<Artist> {
    let created =
        db_services::create_artist(state.repository.as_ref(), request.into_new_artist()).await?;
    Ok(Json(created))
}

/// PUT /v1/artists/{artist_id}
///
/// Update an existing artist from a submitted edit form.
pub async fn update_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<i64>,
    Json(request): Json<ArtistRequest>,
) -> HandlerResult<Artist> {
    let updated = db_services::update_artist(
        state.repository.as_ref(),
        ArtistId::new(artist_id),
        request.into_new_artist(),
    )
    .await?;
    Ok(Json(updated))
}

// =============================================================================
// Shows
// =============================================================================

/// GET /v1/shows
///
/// Every show, resolved with venue and artist display data.
pub async fn list_shows(State(state): State<AppState>) -> HandlerResult<Vec<ShowListing>> {
    let shows = db_services::list_shows(state.repository.as_ref()).await?;
    Ok(Json(shows))
}

/// POST /v1/shows
///
/// Create a new show. A malformed timestamp is rejected here; a dangling
/// venue or artist reference is rejected by the datastore.
pub async fn create_show(
    State(state): State<AppState>,
    Json(request): Json<ShowRequest>,
) -> HandlerResult<Show> {
    let new_show = request.into_new_show().map_err(AppError::BadRequest)?;
    let created = db_services::create_show(state.repository.as_ref(), new_show).await?;
    Ok(Json(created))
}
