use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{artists, shows, venues};
use crate::api::{ArtistId, ShowId, VenueId};
use crate::models::{Artist, NewArtist, NewShow, NewVenue, Show, Venue};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = venues)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VenueRow {
    pub id: i64,
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

// treat_none_as_null: an update replaces every field, including clearing
// seeking_description back to NULL.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = venues)]
#[diesel(treat_none_as_null = true)]
pub struct NewVenueRow {
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

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = artists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ArtistRow {
    pub id: i64,
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

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = artists)]
#[diesel(treat_none_as_null = true)]
pub struct NewArtistRow {
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

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = shows)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ShowRow {
    pub id: i64,
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = shows)]
pub struct NewShowRow {
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: DateTime<Utc>,
}

impl From<VenueRow> for Venue {
    fn from(row: VenueRow) -> Self {
        Venue {
            id: VenueId::new(row.id),
            name: row.name,
            city: row.city,
            state: row.state,
            address: row.address,
            phone: row.phone,
            genres: row.genres,
            image_link: row.image_link,
            facebook_link: row.facebook_link,
            website_link: row.website_link,
            seeking_talent: row.seeking_talent,
            seeking_description: row.seeking_description,
        }
    }
}

impl From<&NewVenue> for NewVenueRow {
    fn from(venue: &NewVenue) -> Self {
        NewVenueRow {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone(),
            genres: venue.genres.clone(),
            image_link: venue.image_link.clone(),
            facebook_link: venue.facebook_link.clone(),
            website_link: venue.website_link.clone(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone(),
        }
    }
}

impl From<ArtistRow> for Artist {
    fn from(row: ArtistRow) -> Self {
        Artist {
            id: ArtistId::new(row.id),
            name: row.name,
            city: row.city,
            state: row.state,
            phone: row.phone,
            genres: row.genres,
            image_link: row.image_link,
            facebook_link: row.facebook_link,
            website_link: row.website_link,
            seeking_venue: row.seeking_venue,
            seeking_description: row.seeking_description,
        }
    }
}

impl From<&NewArtist> for NewArtistRow {
    fn from(artist: &NewArtist) -> Self {
        NewArtistRow {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone(),
            genres: artist.genres.clone(),
            image_link: artist.image_link.clone(),
            facebook_link: artist.facebook_link.clone(),
            website_link: artist.website_link.clone(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone(),
        }
    }
}

impl From<ShowRow> for Show {
    fn from(row: ShowRow) -> Self {
        Show {
            id: ShowId::new(row.id),
            venue_id: VenueId::new(row.venue_id),
            artist_id: ArtistId::new(row.artist_id),
            start_time: row.start_time,
        }
    }
}

impl From<&NewShow> for NewShowRow {
    fn from(show: &NewShow) -> Self {
        NewShowRow {
            venue_id: show.venue_id.value(),
            artist_id: show.artist_id.value(),
            start_time: show.start_time,
        }
    }
}
