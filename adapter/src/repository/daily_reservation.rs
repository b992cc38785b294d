use crate::database::{model::daily_reservation::DailyReservationRow, ConnectionPool};
use async_trait::async_trait;
use chrono::NaiveDate;
use derive_new::new;
use kernel::{
    model::{calendar::MonthRange, daily_reservation::DailyReservation, id::PetKindergardenId},
    repository::daily_reservation::DailyReservationRepository,
};
use shared::error::{AppError, AppResult};
use sqlx::{Postgres, Transaction};

#[derive(new)]
pub struct DailyReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl DailyReservationRepository for DailyReservationRepositoryImpl {
    async fn find_by_month(
        &self,
        pet_kindergarden_id: PetKindergardenId,
        range: MonthRange,
    ) -> AppResult<Vec<DailyReservation>> {
        let rows = sqlx::query_as::<_, DailyReservationRow>(
            r#"
                SELECT
                    pet_kindergarden_id, reserved_date, total_pet_count,
                    time_pet_count, all_day_pet_count, hotel_pet_count
                FROM daily_reservations
                WHERE pet_kindergarden_id = $1
                  AND reserved_date >= $2 AND reserved_date < $3
                ORDER BY reserved_date ASC
            "#,
        )
        .bind(pet_kindergarden_id)
        .bind(range.first_day)
        .bind(range.next_first_day)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(DailyReservation::from).collect())
    }
}

/// 園・日付の集計行を（なければ作成してから）行ロックして読み出す。
/// ロックはトランザクション終了まで保持される
pub async fn lock_daily_reservation(
    tx: &mut Transaction<'_, Postgres>,
    pet_kindergarden_id: PetKindergardenId,
    reserved_date: NaiveDate,
) -> AppResult<DailyReservation> {
    sqlx::query(
        r#"
            INSERT INTO daily_reservations (pet_kindergarden_id, reserved_date)
            VALUES ($1, $2)
            ON CONFLICT (pet_kindergarden_id, reserved_date) DO NOTHING
        "#,
    )
    .bind(pet_kindergarden_id)
    .bind(reserved_date)
    .execute(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?;

    let row = sqlx::query_as::<_, DailyReservationRow>(
        r#"
            SELECT
                pet_kindergarden_id, reserved_date, total_pet_count,
                time_pet_count, all_day_pet_count, hotel_pet_count
            FROM daily_reservations
            WHERE pet_kindergarden_id = $1 AND reserved_date = $2
            FOR UPDATE
        "#,
    )
    .bind(pet_kindergarden_id)
    .bind(reserved_date)
    .fetch_one(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?;

    Ok(row.into())
}

pub async fn save_daily_reservation(
    tx: &mut Transaction<'_, Postgres>,
    daily_reservation: &DailyReservation,
) -> AppResult<()> {
    let res = sqlx::query(
        r#"
            UPDATE daily_reservations
            SET total_pet_count = $3,
                time_pet_count = $4,
                all_day_pet_count = $5,
                hotel_pet_count = $6
            WHERE pet_kindergarden_id = $1 AND reserved_date = $2
        "#,
    )
    .bind(daily_reservation.pet_kindergarden_id)
    .bind(daily_reservation.reserved_date)
    .bind(daily_reservation.total_pet_count)
    .bind(daily_reservation.time_pet_count)
    .bind(daily_reservation.all_day_pet_count)
    .bind(daily_reservation.hotel_pet_count)
    .execute(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?;

    if res.rows_affected() < 1 {
        return Err(AppError::NoRowsAffectedError(
            "No daily reservation record has been updated".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures;
    use kernel::model::ticket::TicketType;

    #[sqlx::test]
    async fn locking_creates_an_empty_row_once(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let kg = fixtures::pet_kindergarden(&db, 5).await?;
        let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();

        let mut tx = db.begin().await?;
        let mut daily = lock_daily_reservation(&mut tx, kg.pet_kindergarden_id, date).await?;
        assert_eq!(daily, DailyReservation::empty(kg.pet_kindergarden_id, date));
        daily.admit(TicketType::Hotel, kg.daily_pet_limit)?;
        save_daily_reservation(&mut tx, &daily).await?;
        tx.commit().await?;

        let mut tx = db.begin().await?;
        let again = lock_daily_reservation(&mut tx, kg.pet_kindergarden_id, date).await?;
        tx.commit().await?;
        assert_eq!(again, daily);

        let repo = DailyReservationRepositoryImpl::new(db);
        let month = repo
            .find_by_month(kg.pet_kindergarden_id, MonthRange::new(2024, 5).unwrap())
            .await?;
        assert_eq!(month, vec![daily]);
        Ok(())
    }
}
