//! Tests for the routes module: view DTOs and partitioning over real data.

use chrono::{DateTime, Duration, TimeZone, Utc};
use encore_rust::api::{ArtistId, VenueId};
use encore_rust::db::repositories::LocalRepository;
use encore_rust::db::repository::{ArtistRepository, ShowRepository, VenueRepository};
use encore_rust::models::{NewArtist, NewShow, NewVenue};
use encore_rust::routes;

fn eval_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 20, 0, 0).unwrap()
}

fn minimal_venue(name: &str) -> NewVenue {
    NewVenue {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        address: String::new(),
        phone: String::new(),
        genres: vec![],
        image_link: "https://images.example.com/hop.jpg".to_string(),
        facebook_link: String::new(),
        website_link: String::new(),
        seeking_talent: false,
        seeking_description: None,
    }
}

fn minimal_artist(name: &str) -> NewArtist {
    NewArtist {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        phone: String::new(),
        genres: vec![],
        image_link: "https://images.example.com/band.jpg".to_string(),
        facebook_link: String::new(),
        website_link: String::new(),
        seeking_venue: false,
        seeking_description: None,
    }
}

#[test]
fn test_venue_summary_construction() {
    let summary = routes::VenueSummary {
        id: VenueId::new(1),
        name: "The Musical Hop".to_string(),
        num_upcoming_shows: 0,
    };
    assert_eq!(summary.id.value(), 1);
    assert_eq!(summary.num_upcoming_shows, 0);
}

#[test]
fn test_show_partition_generic_over_view_types() {
    let now = eval_instant();
    let shows = vec![
        routes::VenueShow {
            artist_id: ArtistId::new(1),
            artist_name: "Guns N Petals".to_string(),
            artist_image_link: String::new(),
            start_time: now - Duration::days(1),
        },
        routes::VenueShow {
            artist_id: ArtistId::new(2),
            artist_name: "Matt Quevado".to_string(),
            artist_image_link: String::new(),
            start_time: now + Duration::days(1),
        },
    ];

    let partition = routes::partition_shows(shows, now, |s| s.start_time);
    assert_eq!(partition.past_shows_count, 1);
    assert_eq!(partition.upcoming_shows_count, 1);
    assert_eq!(partition.past_shows[0].artist_name, "Guns N Petals");
    assert_eq!(partition.upcoming_shows[0].artist_name, "Matt Quevado");
}

#[tokio::test]
async fn test_show_listing_round_trips_through_repository() {
    let repo = LocalRepository::new();
    let venue = repo.create_venue(&minimal_venue("The Musical Hop")).await.unwrap();
    let artist = repo
        .create_artist(&minimal_artist("The Wild Sax Band"))
        .await
        .unwrap();
    repo.create_show(&NewShow {
        venue_id: venue.id,
        artist_id: artist.id,
        start_time: eval_instant(),
    })
    .await
    .unwrap();

    let listings = repo.list_shows().await.unwrap();
    assert_eq!(listings.len(), 1);
    let listing = &listings[0];
    assert_eq!(listing.venue_id, venue.id);
    assert_eq!(listing.artist_id, artist.id);
    assert_eq!(listing.venue_image_link, "https://images.example.com/hop.jpg");
    assert_eq!(listing.artist_image_link, "https://images.example.com/band.jpg");
}

#[test]
fn test_show_listing_serialization() {
    let listing = routes::ShowListing {
        show_id: encore_rust::api::ShowId::new(5),
        venue_id: VenueId::new(1),
        venue_name: "The Musical Hop".to_string(),
        venue_image_link: String::new(),
        artist_id: ArtistId::new(2),
        artist_name: "Guns N Petals".to_string(),
        artist_image_link: String::new(),
        start_time: eval_instant(),
    };

    let json = serde_json::to_value(&listing).unwrap();
    assert_eq!(json["venue_name"], "The Musical Hop");
    assert_eq!(json["artist_name"], "Guns N Petals");

    let back: routes::ShowListing = serde_json::from_value(json).unwrap();
    assert_eq!(back, listing);
}
