use crate::domain::models::calendar_account::RefreshedTokens;
use crate::domain::ports::OAuthTokenService;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::error;

pub struct GoogleOAuthService {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl GoogleOAuthService {
    pub fn new(token_url: String, client_id: String, client_secret: String) -> Self {
        Self {
            client: Client::new(),
            token_url,
            client_id,
            client_secret,
        }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    scope: Option<String>,
}

#[async_trait]
impl OAuthTokenService for GoogleOAuthService {
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedTokens, AppError> {
        let form = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let res = self.client.post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("OAuth token endpoint connection error: {}", e);
                error!("{}", msg);
                AppError::Transient(msg)
            })?;

        let status = res.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            let text = res.text().await.unwrap_or_default();
            error!("OAuth refresh rejected. Status: {}, Body: {}", status, text);
            return Err(AppError::AuthExpired);
        }
        if !status.is_success() {
            let msg = format!("OAuth refresh failed. Status: {}", status);
            error!("{}", msg);
            return Err(AppError::Transient(msg));
        }

        let tokens: TokenResponse = res.json().await
            .map_err(|e| AppError::Transient(format!("Invalid token response: {}", e)))?;

        Ok(RefreshedTokens {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_at: tokens.expires_in.map(|secs| Utc::now().timestamp() + secs),
            scope: tokens.scope,
        })
    }
}
