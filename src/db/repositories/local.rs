//! In-memory repository implementation.
//!
//! The default backend for unit tests and local development. All state lives
//! behind one `RwLock`; every mutation runs to completion under the write
//! lock, so readers never observe partial writes. This gives the same
//! all-or-nothing visibility the Postgres backend gets from transactions.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::api::{ArtistId, ShowId, VenueId};
use crate::db::repository::{
    ArtistRepository, ErrorContext, FullRepository, RepositoryError, RepositoryResult,
    ShowRepository, VenueRepository,
};
use crate::models::{Artist, NewArtist, NewShow, NewVenue, Show, Venue};
use crate::routes::{ArtistShow, ShowListing, VenueShow};

#[derive(Default)]
struct LocalState {
    venues: BTreeMap<i64, Venue>,
    artists: BTreeMap<i64, Artist>,
    shows: BTreeMap<i64, Show>,
    // Next id per table; ids are monotonic and never reused.
    next_venue_id: i64,
    next_artist_id: i64,
    next_show_id: i64,
}

/// In-memory repository over ordered maps with monotonic id assignment.
pub struct LocalRepository {
    state: RwLock<LocalState>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LocalState {
                next_venue_id: 1,
                next_artist_id: 1,
                next_show_id: 1,
                ..Default::default()
            }),
        }
    }

    /// Number of stored venues. Test helper.
    pub fn venue_count(&self) -> usize {
        self.state.read().venues.len()
    }

    /// Number of stored shows. Test helper.
    pub fn show_count(&self) -> usize {
        self.state.read().shows.len()
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn name_matches(name: &str, term: &str) -> bool {
    // Unicode-aware case folding; an empty term matches everything.
    name.to_lowercase().contains(&term.to_lowercase())
}

#[async_trait]
impl VenueRepository for LocalRepository {
    async fn list_venues(&self) -> RepositoryResult<Vec<Venue>> {
        Ok(self.state.read().venues.values().cloned().collect())
    }

    async fn list_recent_venues(&self, limit: i64) -> RepositoryResult<Vec<Venue>> {
        let state = self.state.read();
        Ok(state
            .venues
            .values()
            .rev()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn distinct_locations(&self) -> RepositoryResult<Vec<(String, String)>> {
        let state = self.state.read();
        let locations: BTreeSet<(String, String)> = state
            .venues
            .values()
            .map(|v| (v.city.clone(), v.state.clone()))
            .collect();
        Ok(locations.into_iter().collect())
    }

    async fn venues_by_location(&self, city: &str, state: &str) -> RepositoryResult<Vec<Venue>> {
        let guard = self.state.read();
        Ok(guard
            .venues
            .values()
            .filter(|v| v.city == city && v.state == state)
            .cloned()
            .collect())
    }

    async fn search_venues_by_name(&self, term: &str) -> RepositoryResult<Vec<Venue>> {
        let state = self.state.read();
        Ok(state
            .venues
            .values()
            .filter(|v| name_matches(&v.name, term))
            .cloned()
            .collect())
    }

    async fn get_venue(&self, id: VenueId) -> RepositoryResult<Venue> {
        self.state.read().venues.get(&id.value()).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "venue not found",
                ErrorContext::new("get_venue")
                    .with_entity("venue")
                    .with_entity_id(id),
            )
        })
    }

    async fn create_venue(&self, venue: &NewVenue) -> RepositoryResult<Venue> {
        let mut state = self.state.write();
        let id = state.next_venue_id;
        state.next_venue_id += 1;
        let created = venue.clone().into_venue(VenueId::new(id));
        state.venues.insert(id, created.clone());
        Ok(created)
    }

    async fn update_venue(&self, id: VenueId, venue: &NewVenue) -> RepositoryResult<Venue> {
        let mut state = self.state.write();
        if !state.venues.contains_key(&id.value()) {
            return Err(RepositoryError::not_found_with_context(
                "venue not found",
                ErrorContext::new("update_venue")
                    .with_entity("venue")
                    .with_entity_id(id),
            ));
        }
        let updated = venue.clone().into_venue(id);
        state.venues.insert(id.value(), updated.clone());
        Ok(updated)
    }

    async fn delete_venue(&self, id: VenueId) -> RepositoryResult<Venue> {
        let mut state = self.state.write();
        let venue = state.venues.get(&id.value()).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "venue not found",
                ErrorContext::new("delete_venue")
                    .with_entity("venue")
                    .with_entity_id(id),
            )
        })?;

        let dependents = state
            .shows
            .values()
            .filter(|s| s.venue_id == id)
            .count();
        if dependents > 0 {
            return Err(RepositoryError::conflict_with_context(
                format!(
                    "venue '{}' still has {} scheduled show(s)",
                    venue.name, dependents
                ),
                ErrorContext::new("delete_venue")
                    .with_entity("venue")
                    .with_entity_id(id)
                    .with_details(venue.name.clone()),
            ));
        }

        state.venues.remove(&id.value());
        Ok(venue)
    }
}

#[async_trait]
impl ArtistRepository for LocalRepository {
    async fn list_artists(&self) -> RepositoryResult<Vec<Artist>> {
        Ok(self.state.read().artists.values().cloned().collect())
    }

    async fn list_recent_artists(&self, limit: i64) -> RepositoryResult<Vec<Artist>> {
        let state = self.state.read();
        Ok(state
            .artists
            .values()
            .rev()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn search_artists_by_name(&self, term: &str) -> RepositoryResult<Vec<Artist>> {
        let state = self.state.read();
        Ok(state
            .artists
            .values()
            .filter(|a| name_matches(&a.name, term))
            .cloned()
            .collect())
    }

    async fn get_artist(&self, id: ArtistId) -> RepositoryResult<Artist> {
        self.state.read().artists.get(&id.value()).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "artist not found",
                ErrorContext::new("get_artist")
                    .with_entity("artist")
                    .with_entity_id(id),
            )
        })
    }

    async fn create_artist(&self, artist: &NewArtist) -> RepositoryResult<Artist> {
        let mut state = self.state.write();
        let id = state.next_artist_id;
        state.next_artist_id += 1;
        let created = artist.clone().into_artist(ArtistId::new(id));
        state.artists.insert(id, created.clone());
        Ok(created)
    }

    async fn update_artist(&self, id: ArtistId, artist: &NewArtist) -> RepositoryResult<Artist> {
        let mut state = self.state.write();
        if !state.artists.contains_key(&id.value()) {
            return Err(RepositoryError::not_found_with_context(
                "artist not found",
                ErrorContext::new("update_artist")
                    .with_entity("artist")
                    .with_entity_id(id),
            ));
        }
        let updated = artist.clone().into_artist(id);
        state.artists.insert(id.value(), updated.clone());
        Ok(updated)
    }
}

#[async_trait]
impl ShowRepository for LocalRepository {
    async fn list_shows(&self) -> RepositoryResult<Vec<ShowListing>> {
        let state = self.state.read();
        let mut listings = Vec::with_capacity(state.shows.len());
        for show in state.shows.values() {
            let venue = state.venues.get(&show.venue_id.value()).ok_or_else(|| {
                RepositoryError::internal(format!("show {} references missing venue", show.id))
            })?;
            let artist = state.artists.get(&show.artist_id.value()).ok_or_else(|| {
                RepositoryError::internal(format!("show {} references missing artist", show.id))
            })?;
            listings.push(ShowListing {
                show_id: show.id,
                venue_id: venue.id,
                venue_name: venue.name.clone(),
                venue_image_link: venue.image_link.clone(),
                artist_id: artist.id,
                artist_name: artist.name.clone(),
                artist_image_link: artist.image_link.clone(),
                start_time: show.start_time,
            });
        }
        Ok(listings)
    }

    async fn shows_for_venue(&self, venue_id: VenueId) -> RepositoryResult<Vec<VenueShow>> {
        let state = self.state.read();
        let mut shows = Vec::new();
        for show in state.shows.values().filter(|s| s.venue_id == venue_id) {
            let artist = state.artists.get(&show.artist_id.value()).ok_or_else(|| {
                RepositoryError::internal(format!("show {} references missing artist", show.id))
            })?;
            shows.push(VenueShow {
                artist_id: artist.id,
                artist_name: artist.name.clone(),
                artist_image_link: artist.image_link.clone(),
                start_time: show.start_time,
            });
        }
        Ok(shows)
    }

    async fn shows_for_artist(&self, artist_id: ArtistId) -> RepositoryResult<Vec<ArtistShow>> {
        let state = self.state.read();
        let mut shows = Vec::new();
        for show in state.shows.values().filter(|s| s.artist_id == artist_id) {
            let venue = state.venues.get(&show.venue_id.value()).ok_or_else(|| {
                RepositoryError::internal(format!("show {} references missing venue", show.id))
            })?;
            shows.push(ArtistShow {
                venue_id: venue.id,
                venue_name: venue.name.clone(),
                venue_image_link: venue.image_link.clone(),
                start_time: show.start_time,
            });
        }
        Ok(shows)
    }

    async fn create_show(&self, show: &NewShow) -> RepositoryResult<Show> {
        let mut state = self.state.write();

        // Referential integrity check and insert happen under the same write
        // lock, mirroring the FK enforcement of the Postgres backend.
        if !state.venues.contains_key(&show.venue_id.value()) {
            return Err(RepositoryError::foreign_key_with_context(
                format!("venue {} does not exist", show.venue_id),
                ErrorContext::new("create_show")
                    .with_entity("show")
                    .with_details(format!("venue_id={}", show.venue_id)),
            ));
        }
        if !state.artists.contains_key(&show.artist_id.value()) {
            return Err(RepositoryError::foreign_key_with_context(
                format!("artist {} does not exist", show.artist_id),
                ErrorContext::new("create_show")
                    .with_entity("show")
                    .with_details(format!("artist_id={}", show.artist_id)),
            ));
        }

        let id = state.next_show_id;
        state.next_show_id += 1;
        let created = Show {
            id: ShowId::new(id),
            venue_id: show.venue_id,
            artist_id: show.artist_id,
            start_time: show.start_time,
        };
        state.shows.insert(id, created);
        Ok(created)
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_venue(name: &str, city: &str, state: &str) -> NewVenue {
        NewVenue {
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            address: String::new(),
            phone: String::new(),
            genres: vec![],
            image_link: String::new(),
            facebook_link: String::new(),
            website_link: String::new(),
            seeking_talent: false,
            seeking_description: None,
        }
    }

    fn sample_artist(name: &str) -> NewArtist {
        NewArtist {
            name: name.to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: String::new(),
            genres: vec![],
            image_link: String::new(),
            facebook_link: String::new(),
            website_link: String::new(),
            seeking_venue: false,
            seeking_description: None,
        }
    }

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let repo = LocalRepository::new();
        let first = repo
            .create_venue(&sample_venue("A", "SF", "CA"))
            .await
            .unwrap();
        let second = repo
            .create_venue(&sample_venue("B", "SF", "CA"))
            .await
            .unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_recent_venues_newest_first() {
        let repo = LocalRepository::new();
        for name in ["A", "B", "C"] {
            repo.create_venue(&sample_venue(name, "SF", "CA"))
                .await
                .unwrap();
        }
        let recent = repo.list_recent_venues(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].name, "C");
        assert_eq!(recent[1].name, "B");
    }

    #[tokio::test]
    async fn test_distinct_locations_deduplicates() {
        let repo = LocalRepository::new();
        repo.create_venue(&sample_venue("A", "San Francisco", "CA"))
            .await
            .unwrap();
        repo.create_venue(&sample_venue("B", "San Francisco", "CA"))
            .await
            .unwrap();
        repo.create_venue(&sample_venue("C", "New York", "NY"))
            .await
            .unwrap();

        let locations = repo.distinct_locations().await.unwrap();
        assert_eq!(locations.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_venue_blocked_by_show() {
        let repo = LocalRepository::new();
        let venue = repo
            .create_venue(&sample_venue("The Musical Hop", "SF", "CA"))
            .await
            .unwrap();
        let artist = repo.create_artist(&sample_artist("Guns N Petals")).await.unwrap();
        repo.create_show(&NewShow {
            venue_id: venue.id,
            artist_id: artist.id,
            start_time: Utc.with_ymd_and_hms(2024, 6, 15, 20, 0, 0).unwrap(),
        })
        .await
        .unwrap();

        let err = repo.delete_venue(venue.id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::ConflictError { .. }));
        assert_eq!(repo.venue_count(), 1);
    }

    #[tokio::test]
    async fn test_create_show_rejects_dangling_venue() {
        let repo = LocalRepository::new();
        let artist = repo.create_artist(&sample_artist("Guns N Petals")).await.unwrap();
        let err = repo
            .create_show(&NewShow {
                venue_id: VenueId::new(999),
                artist_id: artist.id,
                start_time: Utc.with_ymd_and_hms(2024, 6, 15, 20, 0, 0).unwrap(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::ForeignKeyViolation { .. }));
        assert_eq!(repo.show_count(), 0);
    }
}
