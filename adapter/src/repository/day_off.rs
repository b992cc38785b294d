use crate::database::{model::day_off::DayOffRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        calendar::MonthRange,
        day_off::{
            event::{CreateDayOff, DeleteDayOff},
            DayOff,
        },
        id::{DayOffId, PetKindergardenId},
    },
    repository::day_off::DayOffRepository,
};
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct DayOffRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl DayOffRepository for DayOffRepositoryImpl {
    async fn create(&self, event: CreateDayOff) -> AppResult<DayOff> {
        // 予約が入っている日でも休業日にできる。既存の予約はそのまま残る
        let row = sqlx::query_as::<_, DayOffRow>(
            r#"
                INSERT INTO day_offs (day_off_id, pet_kindergarden_id, day_off_at)
                VALUES ($1, $2, $3)
                RETURNING day_off_id, pet_kindergarden_id, day_off_at
            "#,
        )
        .bind(DayOffId::new())
        .bind(event.pet_kindergarden_id)
        .bind(event.day_off_at)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
        .map_err(|e| {
            if e.is_unique_violation() {
                AppError::AlreadyExists(format!(
                    "{} is already registered as a day off.",
                    event.day_off_at
                ))
            } else {
                e
            }
        })?;

        Ok(row.into())
    }

    async fn delete(&self, event: DeleteDayOff) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                DELETE FROM day_offs
                WHERE day_off_id = $1 AND pet_kindergarden_id = $2
            "#,
        )
        .bind(event.day_off_id)
        .bind(event.pet_kindergarden_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "The specified day off was not found.".into(),
            ));
        }
        Ok(())
    }

    async fn find_by_month(
        &self,
        pet_kindergarden_id: PetKindergardenId,
        range: MonthRange,
    ) -> AppResult<Vec<DayOff>> {
        let rows = sqlx::query_as::<_, DayOffRow>(
            r#"
                SELECT day_off_id, pet_kindergarden_id, day_off_at
                FROM day_offs
                WHERE pet_kindergarden_id = $1 AND day_off_at >= $2 AND day_off_at < $3
                ORDER BY day_off_at ASC
            "#,
        )
        .bind(pet_kindergarden_id)
        .bind(range.first_day)
        .bind(range.next_first_day)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(DayOff::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures;
    use chrono::NaiveDate;
    use shared::error::ErrorKind;

    #[sqlx::test]
    async fn day_offs_are_unique_per_date(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let kg = fixtures::pet_kindergarden(&db, 5).await?;
        let repo = DayOffRepositoryImpl::new(db);
        let date = NaiveDate::from_ymd_opt(2024, 5, 5).unwrap();

        let day_off = repo
            .create(CreateDayOff::new(kg.pet_kindergarden_id, date))
            .await?;
        let err = repo
            .create(CreateDayOff::new(kg.pet_kindergarden_id, date))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);

        let may = repo
            .find_by_month(kg.pet_kindergarden_id, MonthRange::new(2024, 5).unwrap())
            .await?;
        assert_eq!(may, vec![day_off.clone()]);
        let june = repo
            .find_by_month(kg.pet_kindergarden_id, MonthRange::new(2024, 6).unwrap())
            .await?;
        assert!(june.is_empty());

        repo.delete(DeleteDayOff::new(kg.pet_kindergarden_id, day_off.day_off_id))
            .await?;
        let err = repo
            .delete(DeleteDayOff::new(kg.pet_kindergarden_id, day_off.day_off_id))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        Ok(())
    }
}
