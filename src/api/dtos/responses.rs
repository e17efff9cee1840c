use crate::domain::models::{calendar::DayAvailability, user::User};
use serde::Serialize;

#[derive(Serialize)]
pub struct PublicProfile {
    pub username: String,
    pub name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<User> for PublicProfile {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            name: user.name,
            bio: user.bio,
            avatar_url: user.avatar_url,
        }
    }
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub date: String,
    #[serde(flatten)]
    pub availability: DayAvailability,
}
