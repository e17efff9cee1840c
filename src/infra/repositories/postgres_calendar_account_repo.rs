use crate::domain::{models::calendar_account::CalendarAccount, ports::CalendarAccountRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresCalendarAccountRepo {
    pool: PgPool,
}

impl PostgresCalendarAccountRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CalendarAccountRepository for PostgresCalendarAccountRepo {
    async fn upsert(&self, account: &CalendarAccount) -> Result<CalendarAccount, AppError> {
        sqlx::query_as::<_, CalendarAccount>(
            "INSERT INTO calendar_accounts (id, user_id, provider, access_token, refresh_token, expires_at, scope, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (user_id, provider) DO UPDATE SET
                access_token = excluded.access_token,
                refresh_token = COALESCE(excluded.refresh_token, calendar_accounts.refresh_token),
                expires_at = excluded.expires_at,
                scope = excluded.scope,
                updated_at = excluded.updated_at
             RETURNING *"
        )
            .bind(&account.id).bind(&account.user_id).bind(&account.provider).bind(&account.access_token)
            .bind(&account.refresh_token).bind(account.expires_at).bind(&account.scope).bind(account.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_user(&self, user_id: &str, provider: &str) -> Result<Option<CalendarAccount>, AppError> {
        sqlx::query_as::<_, CalendarAccount>("SELECT * FROM calendar_accounts WHERE user_id = $1 AND provider = $2").bind(user_id).bind(provider).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn update_tokens(&self, account: &CalendarAccount) -> Result<(), AppError> {
        sqlx::query("UPDATE calendar_accounts SET access_token = $1, refresh_token = $2, expires_at = $3, scope = $4, updated_at = $5 WHERE id = $6")
            .bind(&account.access_token).bind(&account.refresh_token).bind(account.expires_at)
            .bind(&account.scope).bind(account.updated_at).bind(&account.id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }
}
