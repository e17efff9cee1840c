use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub name: String,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            name,
            bio: None,
            email: None,
            avatar_url: None,
            created_at: Utc::now(),
        }
    }
}

/// Static segments under `/api/v1/users/` that a username would shadow.
const RESERVED_USERNAMES: [&str; 3] = ["profile", "time-intervals", "connect-calendar"];

/// Lowercases and validates a requested username.
/// Accepts 3 or more characters from `a-z`, `0-9` and `-`.
pub fn normalize_username(raw: &str) -> Option<String> {
    let username = raw.trim().to_lowercase();
    let valid = username.len() >= 3
        && username.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !RESERVED_USERNAMES.contains(&username.as_str());

    valid.then_some(username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_username() {
        assert_eq!(normalize_username("  Jane-Doe "), Some("jane-doe".to_string()));
        assert_eq!(normalize_username("ab"), None);
        assert_eq!(normalize_username("jane doe"), None);
        assert_eq!(normalize_username("jane_doe"), None);
        assert_eq!(normalize_username("Profile"), None);
    }
}
