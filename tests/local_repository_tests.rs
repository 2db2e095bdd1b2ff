//! Expanded tests for LocalRepository.
//!
//! These tests cover concurrent access patterns, edge cases, and error
//! conditions for the in-memory repository implementation.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use encore_rust::api::{ArtistId, VenueId};
use encore_rust::db::repositories::LocalRepository;
use encore_rust::db::repository::{
    ArtistRepository, RepositoryError, ShowRepository, VenueRepository,
};
use encore_rust::models::{NewArtist, NewShow, NewVenue};

fn venue_input(name: &str, city: &str, state: &str) -> NewVenue {
    NewVenue {
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        address: String::new(),
        phone: String::new(),
        genres: vec!["Jazz".to_string()],
        image_link: String::new(),
        facebook_link: String::new(),
        website_link: String::new(),
        seeking_talent: false,
        seeking_description: None,
    }
}

fn artist_input(name: &str) -> NewArtist {
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

// =========================================================
// Concurrent Access Tests
// =========================================================

#[tokio::test]
async fn test_concurrent_venue_creation_assigns_unique_ids() {
    let repo = Arc::new(LocalRepository::new());

    let mut handles = vec![];
    for i in 0..10 {
        let repo_clone = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo_clone
                .create_venue(&venue_input(&format!("venue_{}", i), "SF", "CA"))
                .await
        }));
    }

    let mut ids = std::collections::HashSet::new();
    for handle in handles {
        let venue = handle.await.unwrap().unwrap();
        ids.insert(venue.id);
    }

    assert_eq!(ids.len(), 10);
    assert_eq!(repo.list_venues().await.unwrap().len(), 10);
}

#[tokio::test]
async fn test_concurrent_show_creation_same_venue_and_artist() {
    let repo = Arc::new(LocalRepository::new());
    let venue = repo
        .create_venue(&venue_input("The Musical Hop", "SF", "CA"))
        .await
        .unwrap();
    let artist = repo.create_artist(&artist_input("Guns N Petals")).await.unwrap();
    let start = Utc.with_ymd_and_hms(2024, 6, 15, 20, 0, 0).unwrap();

    let first = {
        let repo = Arc::clone(&repo);
        tokio::spawn(async move {
            repo.create_show(&NewShow {
                venue_id: venue.id,
                artist_id: artist.id,
                start_time: start,
            })
            .await
        })
    };
    let second = {
        let repo = Arc::clone(&repo);
        tokio::spawn(async move {
            repo.create_show(&NewShow {
                venue_id: venue.id,
                artist_id: artist.id,
                start_time: start + Duration::hours(2),
            })
            .await
        })
    };

    let show_a = first.await.unwrap().unwrap();
    let show_b = second.await.unwrap().unwrap();
    assert_ne!(show_a.id, show_b.id);
    assert_eq!(repo.shows_for_venue(venue.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_concurrent_readers_during_writes() {
    let repo = Arc::new(LocalRepository::new());
    repo.create_venue(&venue_input("initial", "SF", "CA"))
        .await
        .unwrap();

    let mut handles = vec![];
    for i in 0..5 {
        let repo_clone = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo_clone
                .create_venue(&venue_input(&format!("venue_{}", i), "SF", "CA"))
                .await
                .map(|_| 0usize)
        }));
        let repo_clone = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo_clone.list_venues().await.map(|v| v.len())
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
    assert_eq!(repo.list_venues().await.unwrap().len(), 6);
}

// =========================================================
// Edge Cases
// =========================================================

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let repo = LocalRepository::new();
    let first = repo
        .create_venue(&venue_input("first", "SF", "CA"))
        .await
        .unwrap();
    repo.delete_venue(first.id).await.unwrap();

    let second = repo
        .create_venue(&venue_input("second", "SF", "CA"))
        .await
        .unwrap();
    assert!(second.id > first.id);
}

#[tokio::test]
async fn test_recent_listing_limit_larger_than_rows() {
    let repo = LocalRepository::new();
    repo.create_artist(&artist_input("solo")).await.unwrap();

    let recent = repo.list_recent_artists(10).await.unwrap();
    assert_eq!(recent.len(), 1);
}

#[tokio::test]
async fn test_recent_listing_zero_limit() {
    let repo = LocalRepository::new();
    repo.create_artist(&artist_input("solo")).await.unwrap();

    let recent = repo.list_recent_artists(0).await.unwrap();
    assert!(recent.is_empty());
}

#[tokio::test]
async fn test_search_unicode_case_folding() {
    let repo = LocalRepository::new();
    repo.create_artist(&artist_input("Motörhead Tribute"))
        .await
        .unwrap();

    let results = repo.search_artists_by_name("MOTÖR").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Motörhead Tribute");
}

#[tokio::test]
async fn test_venues_by_location_requires_exact_pair() {
    let repo = LocalRepository::new();
    repo.create_venue(&venue_input("A", "Springfield", "IL"))
        .await
        .unwrap();
    repo.create_venue(&venue_input("B", "Springfield", "MA"))
        .await
        .unwrap();

    let il = repo.venues_by_location("Springfield", "IL").await.unwrap();
    assert_eq!(il.len(), 1);
    assert_eq!(il[0].name, "A");

    let none = repo.venues_by_location("Springfield", "OR").await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_shows_for_unknown_venue_is_empty() {
    let repo = LocalRepository::new();
    let shows = repo.shows_for_venue(VenueId::new(123)).await.unwrap();
    assert!(shows.is_empty());
}

#[tokio::test]
async fn test_get_artist_not_found_context() {
    let repo = LocalRepository::new();
    let err = repo.get_artist(ArtistId::new(5)).await.unwrap_err();
    match err {
        RepositoryError::NotFound { ref context, .. } => {
            assert_eq!(context.entity.as_deref(), Some("artist"));
            assert_eq!(context.entity_id.as_deref(), Some("5"));
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_does_not_change_id() {
    let repo = LocalRepository::new();
    let artist = repo.create_artist(&artist_input("Before")).await.unwrap();
    let updated = repo
        .update_artist(artist.id, &artist_input("After"))
        .await
        .unwrap();
    assert_eq!(updated.id, artist.id);
    assert_eq!(updated.name, "After");
    assert_eq!(repo.list_artists().await.unwrap().len(), 1);
}
