use scheduling_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::factory::sqlite_repositories,
    domain::models::{
        booking::{Booking, ExternalRef},
        calendar_account::{CalendarAccount, RefreshedTokens},
        user::User,
    },
    domain::ports::{CalendarService, OAuthTokenService},
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    Router,
};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use chrono_tz::Tz;
use tower::ServiceExt;
use tower_cookies::Key;
use serde_json::{json, Value};

pub const REFRESHED_ACCESS_TOKEN: &str = "refreshed-access-token";

#[derive(Default)]
pub struct MockOAuthService {
    pub calls: AtomicUsize,
    pub reject: AtomicBool,
}

#[async_trait]
impl OAuthTokenService for MockOAuthService {
    async fn refresh(&self, _refresh_token: &str) -> Result<RefreshedTokens, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.reject.load(Ordering::SeqCst) {
            return Err(AppError::AuthExpired);
        }
        Ok(RefreshedTokens {
            access_token: REFRESHED_ACCESS_TOKEN.to_string(),
            refresh_token: None,
            expires_at: Some((Utc::now() + ChronoDuration::hours(1)).timestamp()),
            scope: None,
        })
    }
}

#[derive(Default)]
pub struct MockCalendarService {
    pub fail: AtomicBool,
    /// Access tokens seen by each mirror call.
    pub tokens_seen: Mutex<Vec<String>>,
}

#[async_trait]
impl CalendarService for MockCalendarService {
    async fn mirror_booking(&self, booking: &Booking, _host: &User, account: &CalendarAccount) -> Result<ExternalRef, AppError> {
        if let Ok(mut seen) = self.tokens_seen.lock() {
            seen.push(account.access_token.clone());
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Transient("calendar api returned 503".into()));
        }
        Ok(ExternalRef {
            event_id: format!("evt-{}", booking.id),
            meeting_link: Some("https://meet.example.com/abc-defg-hij".to_string()),
        })
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub oauth: Arc<MockOAuthService>,
    pub calendar: Arc<MockCalendarService>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        Self::with_timezone(chrono_tz::UTC).await
    }

    pub async fn with_timezone(timezone: Tz) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(10));

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            timezone,
            google_client_id: "client".to_string(),
            google_client_secret: "secret".to_string(),
            google_token_url: "http://localhost/token".to_string(),
            google_calendar_api_url: "http://localhost/calendar".to_string(),
            calendar_event_prefix: "Call".to_string(),
            session_key: Key::generate(),
        };

        let oauth = Arc::new(MockOAuthService::default());
        let calendar = Arc::new(MockCalendarService::default());

        let state = Arc::new(AppState::new(
            config,
            sqlite_repositories(pool.clone()),
            oauth.clone(),
            calendar.clone(),
        ));

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            oauth,
            calendar,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>, cookie: Option<&str>) -> (StatusCode, Value, Vec<String>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let set_cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };

        (status, json, set_cookies)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body, _) = self.request("GET", uri, None, None).await;
        (status, body)
    }

    pub async fn post(&self, uri: &str, body: Value, cookie: Option<&str>) -> (StatusCode, Value) {
        let (status, body, _) = self.request("POST", uri, Some(body), cookie).await;
        (status, body)
    }

    /// Registers a host and returns the session cookie pair (`name=value`).
    pub async fn register_host(&self, username: &str) -> String {
        let (status, _, set_cookies) = self.request(
            "POST",
            "/api/v1/users",
            Some(json!({"name": "Test Host", "username": username})),
            None,
        ).await;

        if status != StatusCode::CREATED {
            panic!("Registration failed in test helper: status {}", status);
        }

        set_cookies.iter()
            .find(|c| c.starts_with("scheduling.user_id="))
            .and_then(|c| c.split(';').next())
            .expect("No session cookie returned")
            .to_string()
    }

    pub async fn set_intervals(&self, cookie: &str, intervals: Value) -> StatusCode {
        let (status, _) = self.post("/api/v1/users/time-intervals", json!({ "intervals": intervals }), Some(cookie)).await;
        status
    }

    /// Same `[start, end)` window on every weekday.
    pub async fn set_every_day(&self, cookie: &str, start: i32, end: i32) {
        let intervals: Vec<Value> = (0..7)
            .map(|day| json!({"week_day": day, "start_time_in_minutes": start, "end_time_in_minutes": end}))
            .collect();
        let status = self.set_intervals(cookie, Value::Array(intervals)).await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
