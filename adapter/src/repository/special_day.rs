use crate::database::{model::special_day::SpecialDayRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{calendar::MonthRange, special_day::SpecialDay},
    repository::special_day::SpecialDayRepository,
};
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct SpecialDayRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl SpecialDayRepository for SpecialDayRepositoryImpl {
    async fn find_by_month(&self, range: MonthRange) -> AppResult<Vec<SpecialDay>> {
        let rows = sqlx::query_as::<_, SpecialDayRow>(
            r#"
                SELECT special_day_date, name
                FROM special_days
                WHERE special_day_date >= $1 AND special_day_date < $2
                ORDER BY special_day_date ASC
            "#,
        )
        .bind(range.first_day)
        .bind(range.next_first_day)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(SpecialDay::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[sqlx::test]
    async fn special_days_are_listed_by_month(pool: sqlx::PgPool) -> anyhow::Result<()> {
        sqlx::query(
            r#"
                INSERT INTO special_days (special_day_date, name)
                VALUES ('2024-05-05', 'Children''s Day'), ('2024-06-06', 'Memorial Day')
            "#,
        )
        .execute(&pool)
        .await?;
        let repo = SpecialDayRepositoryImpl::new(ConnectionPool::new(pool));

        let may = repo.find_by_month(MonthRange::new(2024, 5).unwrap()).await?;
        assert_eq!(
            may,
            vec![SpecialDay {
                date: NaiveDate::from_ymd_opt(2024, 5, 5).unwrap(),
                name: "Children's Day".into(),
            }]
        );
        Ok(())
    }
}
