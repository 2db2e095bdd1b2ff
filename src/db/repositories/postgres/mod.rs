//! Postgres repository implementation using Diesel.
//!
//! This module implements the repository traits against a Postgres database
//! holding the `venues`, `artists`, and `shows` tables.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures
//! - Connection health monitoring
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::task;

use crate::api::{ArtistId, VenueId};
use crate::db::repository::{
    ArtistRepository, ErrorContext, FullRepository, RepositoryError, RepositoryResult,
    ShowRepository, VenueRepository,
};
use crate::models::{Artist, NewArtist, NewShow, NewVenue, Show, Venue};
use crate::routes::{ArtistShow, ShowListing, VenueShow};

mod models;
mod schema;

use models::*;
use schema::{artists, shows, venues};

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    ///
    /// See the module documentation for the recognized variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let max_pool_size = std::env::var("PG_POOL_MAX")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let min_pool_size = std::env::var("PG_POOL_MIN")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(1);

        let connection_timeout_sec = std::env::var("PG_CONN_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let idle_timeout_sec = std::env::var("PG_IDLE_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(600);

        let max_retries = std::env::var("PG_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(3);

        let retry_delay_ms = std::env::var("PG_RETRY_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(100);

        Ok(Self {
            database_url,
            max_pool_size,
            min_pool_size,
            connection_timeout_sec,
            idle_timeout_sec,
            max_retries,
            retry_delay_ms,
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Pool health statistics.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub connections_in_use: u32,
    /// Number of idle connections
    pub idle_connections: u32,
    /// Total number of connections in the pool
    pub total_connections: u32,
    /// Maximum pool size
    pub max_size: u32,
    /// Total successful queries executed
    pub total_queries: u64,
    /// Total failed queries
    pub failed_queries: u64,
    /// Total retried operations
    pub retried_operations: u64,
}

/// Diesel-backed repository for Postgres.
///
/// This repository implementation provides:
/// - Connection pooling with configurable limits
/// - Automatic retry for transient failures
/// - Health monitoring and statistics
/// - Automatic schema migrations
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
    // Metrics counters
    total_queries: std::sync::Arc<AtomicU64>,
    failed_queries: std::sync::Arc<AtomicU64>,
    retried_operations: std::sync::Arc<AtomicU64>,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    ///
    /// # Arguments
    /// * `config` - Database configuration
    ///
    /// # Returns
    /// * `Ok(PostgresRepository)` on success
    /// * `Err(RepositoryError)` if connection or migration fails
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true) // Validate connections before use
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        // Run migrations once during initialization
        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self {
            pool,
            config,
            total_queries: std::sync::Arc::new(AtomicU64::new(0)),
            failed_queries: std::sync::Arc::new(AtomicU64::new(0)),
            retried_operations: std::sync::Arc::new(AtomicU64::new(0)),
        })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        Ok(())
    }

    /// Execute a database operation with automatic retry for transient failures.
    ///
    /// Retries up to `max_retries` times when a retryable error occurs
    /// (connection errors, timeouts, serialization failures). The connection
    /// is checked out of the pool per attempt and returned when the closure
    /// finishes, on every exit path.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;
        let total_queries = self.total_queries.clone();
        let failed_queries = self.failed_queries.clone();
        let retried_operations = self.retried_operations.clone();

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    retried_operations.fetch_add(1, Ordering::Relaxed);
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2; // Exponential backoff
                }

                // Get connection
                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new("get_connection")
                                .with_details(format!("attempt={}", attempt + 1))
                                .retryable(),
                        );
                        if attempt < max_retries {
                            last_error = Some(err);
                            continue;
                        }
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(err);
                    }
                };

                // Execute the operation
                total_queries.fetch_add(1, Ordering::Relaxed);
                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        last_error = Some(e);
                        continue;
                    }
                    Err(e) => {
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(e);
                    }
                }
            }

            failed_queries.fetch_add(1, Ordering::Relaxed);
            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }

    /// Get pool health statistics.
    ///
    /// Returns current pool state and query statistics for monitoring.
    pub fn get_pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            total_connections: state.connections,
            max_size: self.config.max_pool_size,
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
            retried_operations: self.retried_operations.load(Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl VenueRepository for PostgresRepository {
    async fn list_venues(&self) -> RepositoryResult<Vec<Venue>> {
        self.with_conn(|conn| {
            venues::table
                .order(venues::id.asc())
                .select(VenueRow::as_select())
                .load::<VenueRow>(conn)
                .map(|rows| rows.into_iter().map(Venue::from).collect())
                .map_err(|e| RepositoryError::from(e).with_operation("list_venues"))
        })
        .await
    }

    async fn list_recent_venues(&self, limit: i64) -> RepositoryResult<Vec<Venue>> {
        self.with_conn(move |conn| {
            venues::table
                .order(venues::id.desc())
                .limit(limit)
                .select(VenueRow::as_select())
                .load::<VenueRow>(conn)
                .map(|rows| rows.into_iter().map(Venue::from).collect())
                .map_err(|e| RepositoryError::from(e).with_operation("list_recent_venues"))
        })
        .await
    }

    async fn distinct_locations(&self) -> RepositoryResult<Vec<(String, String)>> {
        self.with_conn(|conn| {
            venues::table
                .select((venues::city, venues::state))
                .distinct()
                .load::<(String, String)>(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("distinct_locations"))
        })
        .await
    }

    async fn venues_by_location(&self, city: &str, state: &str) -> RepositoryResult<Vec<Venue>> {
        let city = city.to_string();
        let state = state.to_string();
        self.with_conn(move |conn| {
            venues::table
                .filter(venues::city.eq(&city).and(venues::state.eq(&state)))
                .order(venues::id.asc())
                .select(VenueRow::as_select())
                .load::<VenueRow>(conn)
                .map(|rows| rows.into_iter().map(Venue::from).collect())
                .map_err(|e| RepositoryError::from(e).with_operation("venues_by_location"))
        })
        .await
    }

    async fn search_venues_by_name(&self, term: &str) -> RepositoryResult<Vec<Venue>> {
        // ILIKE gives case-insensitive matching with the database's collation;
        // an empty term becomes '%%' and matches every row.
        let pattern = format!("%{}%", term);
        self.with_conn(move |conn| {
            venues::table
                .filter(venues::name.ilike(&pattern))
                .order(venues::id.asc())
                .select(VenueRow::as_select())
                .load::<VenueRow>(conn)
                .map(|rows| rows.into_iter().map(Venue::from).collect())
                .map_err(|e| RepositoryError::from(e).with_operation("search_venues_by_name"))
        })
        .await
    }

    async fn get_venue(&self, id: VenueId) -> RepositoryResult<Venue> {
        self.with_conn(move |conn| {
            venues::table
                .find(id.value())
                .select(VenueRow::as_select())
                .first::<VenueRow>(conn)
                .optional()
                .map_err(RepositoryError::from)?
                .map(Venue::from)
                .ok_or_else(|| {
                    RepositoryError::not_found_with_context(
                        "venue not found",
                        ErrorContext::new("get_venue")
                            .with_entity("venue")
                            .with_entity_id(id),
                    )
                })
        })
        .await
    }

    async fn create_venue(&self, venue: &NewVenue) -> RepositoryResult<Venue> {
        let new_row = NewVenueRow::from(venue);
        let name = venue.name.clone();
        self.with_conn(move |conn| {
            conn.transaction::<Venue, RepositoryError, _>(|conn| {
                diesel::insert_into(venues::table)
                    .values(&new_row)
                    .returning(VenueRow::as_returning())
                    .get_result::<VenueRow>(conn)
                    .map(Venue::from)
                    .map_err(RepositoryError::from)
            })
            .map_err(|e| {
                e.with_operation("create_venue")
                    .with_entity("venue")
                    .with_details(name.clone())
            })
        })
        .await
    }

    async fn update_venue(&self, id: VenueId, venue: &NewVenue) -> RepositoryResult<Venue> {
        let changes = NewVenueRow::from(venue);
        let name = venue.name.clone();
        self.with_conn(move |conn| {
            conn.transaction::<Venue, RepositoryError, _>(|conn| {
                diesel::update(venues::table.find(id.value()))
                    .set(&changes)
                    .returning(VenueRow::as_returning())
                    .get_result::<VenueRow>(conn)
                    .optional()
                    .map_err(RepositoryError::from)?
                    .map(Venue::from)
                    .ok_or_else(|| {
                        RepositoryError::not_found_with_context(
                            "venue not found",
                            ErrorContext::new("update_venue")
                                .with_entity("venue")
                                .with_entity_id(id),
                        )
                    })
            })
            .map_err(|e| e.with_details(name.clone()))
        })
        .await
    }

    async fn delete_venue(&self, id: VenueId) -> RepositoryResult<Venue> {
        self.with_conn(move |conn| {
            conn.transaction::<Venue, RepositoryError, _>(|conn| {
                let row = venues::table
                    .find(id.value())
                    .select(VenueRow::as_select())
                    .first::<VenueRow>(conn)
                    .optional()
                    .map_err(RepositoryError::from)?
                    .ok_or_else(|| {
                        RepositoryError::not_found_with_context(
                            "venue not found",
                            ErrorContext::new("delete_venue")
                                .with_entity("venue")
                                .with_entity_id(id),
                        )
                    })?;

                let dependents: i64 = shows::table
                    .filter(shows::venue_id.eq(id.value()))
                    .count()
                    .get_result(conn)
                    .map_err(RepositoryError::from)?;
                if dependents > 0 {
                    return Err(RepositoryError::conflict_with_context(
                        format!(
                            "venue '{}' still has {} scheduled show(s)",
                            row.name, dependents
                        ),
                        ErrorContext::new("delete_venue")
                            .with_entity("venue")
                            .with_entity_id(id)
                            .with_details(row.name.clone()),
                    ));
                }

                diesel::delete(venues::table.find(id.value()))
                    .execute(conn)
                    .map_err(RepositoryError::from)?;
                Ok(Venue::from(row))
            })
        })
        .await
    }
}

#[async_trait]
impl ArtistRepository for PostgresRepository {
    async fn list_artists(&self) -> RepositoryResult<Vec<Artist>> {
        self.with_conn(|conn| {
            artists::table
                .order(artists::id.asc())
                .select(ArtistRow::as_select())
                .load::<ArtistRow>(conn)
                .map(|rows| rows.into_iter().map(Artist::from).collect())
                .map_err(|e| RepositoryError::from(e).with_operation("list_artists"))
        })
        .await
    }

    async fn list_recent_artists(&self, limit: i64) -> RepositoryResult<Vec<Artist>> {
        self.with_conn(move |conn| {
            artists::table
                .order(artists::id.desc())
                .limit(limit)
                .select(ArtistRow::as_select())
                .load::<ArtistRow>(conn)
                .map(|rows| rows.into_iter().map(Artist::from).collect())
                .map_err(|e| RepositoryError::from(e).with_operation("list_recent_artists"))
        })
        .await
    }

    async fn search_artists_by_name(&self, term: &str) -> RepositoryResult<Vec<Artist>> {
        let pattern = format!("%{}%", term);
        self.with_conn(move |conn| {
            artists::table
                .filter(artists::name.ilike(&pattern))
                .order(artists::id.asc())
                .select(ArtistRow::as_select())
                .load::<ArtistRow>(conn)
                .map(|rows| rows.into_iter().map(Artist::from).collect())
                .map_err(|e| RepositoryError::from(e).with_operation("search_artists_by_name"))
        })
        .await
    }

    async fn get_artist(&self, id: ArtistId) -> RepositoryResult<Artist> {
        self.with_conn(move |conn| {
            artists::table
                .find(id.value())
                .select(ArtistRow::as_select())
                .first::<ArtistRow>(conn)
                .optional()
                .map_err(RepositoryError::from)?
                .map(Artist::from)
                .ok_or_else(|| {
                    RepositoryError::not_found_with_context(
                        "artist not found",
                        ErrorContext::new("get_artist")
                            .with_entity("artist")
                            .with_entity_id(id),
                    )
                })
        })
        .await
    }

    async fn create_artist(&self, artist: &NewArtist) -> RepositoryResult<Artist> {
        let new_row = NewArtistRow::from(artist);
        let name = artist.name.clone();
        self.with_conn(move |conn| {
            conn.transaction::<Artist, RepositoryError, _>(|conn| {
                diesel::insert_into(artists::table)
                    .values(&new_row)
                    .returning(ArtistRow::as_returning())
                    .get_result::<ArtistRow>(conn)
                    .map(Artist::from)
                    .map_err(RepositoryError::from)
            })
            .map_err(|e| {
                e.with_operation("create_artist")
                    .with_entity("artist")
                    .with_details(name.clone())
            })
        })
        .await
    }

    async fn update_artist(&self, id: ArtistId, artist: &NewArtist) -> RepositoryResult<Artist> {
        let changes = NewArtistRow::from(artist);
        let name = artist.name.clone();
        self.with_conn(move |conn| {
            conn.transaction::<Artist, RepositoryError, _>(|conn| {
                diesel::update(artists::table.find(id.value()))
                    .set(&changes)
                    .returning(ArtistRow::as_returning())
                    .get_result::<ArtistRow>(conn)
                    .optional()
                    .map_err(RepositoryError::from)?
                    .map(Artist::from)
                    .ok_or_else(|| {
                        RepositoryError::not_found_with_context(
                            "artist not found",
                            ErrorContext::new("update_artist")
                                .with_entity("artist")
                                .with_entity_id(id),
                        )
                    })
            })
            .map_err(|e| e.with_details(name.clone()))
        })
        .await
    }
}

#[async_trait]
impl ShowRepository for PostgresRepository {
    async fn list_shows(&self) -> RepositoryResult<Vec<ShowListing>> {
        self.with_conn(|conn| {
            shows::table
                .inner_join(venues::table)
                .inner_join(artists::table)
                .order(shows::id.asc())
                .select((
                    shows::id,
                    venues::id,
                    venues::name,
                    venues::image_link,
                    artists::id,
                    artists::name,
                    artists::image_link,
                    shows::start_time,
                ))
                .load::<(
                    i64,
                    i64,
                    String,
                    String,
                    i64,
                    String,
                    String,
                    chrono::DateTime<chrono::Utc>,
                )>(conn)
                .map(|rows| {
                    rows.into_iter()
                        .map(
                            |(
                                show_id,
                                venue_id,
                                venue_name,
                                venue_image_link,
                                artist_id,
                                artist_name,
                                artist_image_link,
                                start_time,
                            )| ShowListing {
                                show_id: crate::api::ShowId::new(show_id),
                                venue_id: VenueId::new(venue_id),
                                venue_name,
                                venue_image_link,
                                artist_id: ArtistId::new(artist_id),
                                artist_name,
                                artist_image_link,
                                start_time,
                            },
                        )
                        .collect()
                })
                .map_err(|e| RepositoryError::from(e).with_operation("list_shows"))
        })
        .await
    }

    async fn shows_for_venue(&self, venue_id: VenueId) -> RepositoryResult<Vec<VenueShow>> {
        self.with_conn(move |conn| {
            shows::table
                .inner_join(artists::table)
                .filter(shows::venue_id.eq(venue_id.value()))
                .order(shows::id.asc())
                .select((
                    artists::id,
                    artists::name,
                    artists::image_link,
                    shows::start_time,
                ))
                .load::<(i64, String, String, chrono::DateTime<chrono::Utc>)>(conn)
                .map(|rows| {
                    rows.into_iter()
                        .map(
                            |(artist_id, artist_name, artist_image_link, start_time)| VenueShow {
                                artist_id: ArtistId::new(artist_id),
                                artist_name,
                                artist_image_link,
                                start_time,
                            },
                        )
                        .collect()
                })
                .map_err(|e| RepositoryError::from(e).with_operation("shows_for_venue"))
        })
        .await
    }

    async fn shows_for_artist(&self, artist_id: ArtistId) -> RepositoryResult<Vec<ArtistShow>> {
        self.with_conn(move |conn| {
            shows::table
                .inner_join(venues::table)
                .filter(shows::artist_id.eq(artist_id.value()))
                .order(shows::id.asc())
                .select((
                    venues::id,
                    venues::name,
                    venues::image_link,
                    shows::start_time,
                ))
                .load::<(i64, String, String, chrono::DateTime<chrono::Utc>)>(conn)
                .map(|rows| {
                    rows.into_iter()
                        .map(
                            |(venue_id, venue_name, venue_image_link, start_time)| ArtistShow {
                                venue_id: VenueId::new(venue_id),
                                venue_name,
                                venue_image_link,
                                start_time,
                            },
                        )
                        .collect()
                })
                .map_err(|e| RepositoryError::from(e).with_operation("shows_for_artist"))
        })
        .await
    }

    async fn create_show(&self, show: &NewShow) -> RepositoryResult<Show> {
        let new_row = NewShowRow::from(show);
        self.with_conn(move |conn| {
            conn.transaction::<Show, RepositoryError, _>(|conn| {
                // A dangling venue_id/artist_id surfaces here as a foreign
                // key violation from the database.
                diesel::insert_into(shows::table)
                    .values(&new_row)
                    .returning(ShowRow::as_returning())
                    .get_result::<ShowRow>(conn)
                    .map(Show::from)
                    .map_err(RepositoryError::from)
            })
            .map_err(|e| e.with_operation("create_show").with_entity("show"))
        })
        .await
    }
}

#[async_trait]
impl FullRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(|e| RepositoryError::from(e).with_operation("health_check"))
        })
        .await
    }
}
