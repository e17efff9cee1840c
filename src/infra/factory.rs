use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::{AppState, Repositories};
use crate::infra::google::{
    google_calendar_service::GoogleCalendarService, google_oauth_service::GoogleOAuthService,
};
use crate::infra::repositories::{
    postgres_booking_repo::PostgresBookingRepo, postgres_calendar_account_repo::PostgresCalendarAccountRepo,
    postgres_time_interval_repo::PostgresTimeIntervalRepo, postgres_user_repo::PostgresUserRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_calendar_account_repo::SqliteCalendarAccountRepo,
    sqlite_time_interval_repo::SqliteTimeIntervalRepo, sqlite_user_repo::SqliteUserRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    let oauth_service = Arc::new(GoogleOAuthService::new(
        config.google_token_url.clone(),
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
    ));
    let calendar_service = Arc::new(GoogleCalendarService::new(
        config.google_calendar_api_url.clone(),
        config.calendar_event_prefix.clone(),
    ));

    let repos = if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        Repositories {
            user_repo: Arc::new(PostgresUserRepo::new(pool.clone())),
            interval_repo: Arc::new(PostgresTimeIntervalRepo::new(pool.clone())),
            booking_repo: Arc::new(PostgresBookingRepo::new(pool.clone())),
            account_repo: Arc::new(PostgresCalendarAccountRepo::new(pool)),
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        sqlite_repositories(pool)
    };

    AppState::new(config.clone(), repos, oauth_service, calendar_service)
}

pub fn sqlite_repositories(pool: SqlitePool) -> Repositories {
    Repositories {
        user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
        interval_repo: Arc::new(SqliteTimeIntervalRepo::new(pool.clone())),
        booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
        account_repo: Arc::new(SqliteCalendarAccountRepo::new(pool)),
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
