use crate::domain::{models::time_interval::WeekdayInterval, ports::TimeIntervalRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresTimeIntervalRepo {
    pool: PgPool,
}

impl PostgresTimeIntervalRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimeIntervalRepository for PostgresTimeIntervalRepo {
    async fn replace_for_user(&self, user_id: &str, intervals: &[WeekdayInterval]) -> Result<Vec<WeekdayInterval>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        sqlx::query("DELETE FROM user_time_intervals WHERE user_id = $1").bind(user_id).execute(&mut *tx).await.map_err(AppError::Database)?;

        let mut created = Vec::with_capacity(intervals.len());
        for interval in intervals {
            let row = sqlx::query_as::<_, WeekdayInterval>(
                "INSERT INTO user_time_intervals (id, user_id, week_day, time_start_in_minutes, time_end_in_minutes) VALUES ($1, $2, $3, $4, $5) RETURNING *"
            )
                .bind(&interval.id).bind(user_id).bind(interval.week_day)
                .bind(interval.time_start_in_minutes).bind(interval.time_end_in_minutes)
                .fetch_one(&mut *tx).await.map_err(AppError::Database)?;
            created.push(row);
        }

        tx.commit().await.map_err(AppError::Database)?;
        created.sort_by_key(|i| i.week_day);
        Ok(created)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<WeekdayInterval>, AppError> {
        sqlx::query_as::<_, WeekdayInterval>("SELECT * FROM user_time_intervals WHERE user_id = $1 ORDER BY week_day ASC").bind(user_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_weekday(&self, user_id: &str, week_day: i32) -> Result<Option<WeekdayInterval>, AppError> {
        sqlx::query_as::<_, WeekdayInterval>("SELECT * FROM user_time_intervals WHERE user_id = $1 AND week_day = $2").bind(user_id).bind(week_day).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
}
