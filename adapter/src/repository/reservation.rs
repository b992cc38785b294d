use crate::{
    database::{
        model::{
            customer::CustomerTicketRow, day_off::DayOffRow, pet_kindergarden::PetKindergardenRow,
            reservation::ReservationRow, special_day::SpecialDayRow,
        },
        retry_on_serialization_failure, ConnectionPool,
    },
    repository::daily_reservation::{lock_daily_reservation, save_daily_reservation},
};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use derive_new::new;
use kernel::{
    model::{
        calendar::DayStatus,
        customer::{CustomerTicket, TicketRejection},
        id::{CustomerId, CustomerPetId, CustomerTicketId, PetKindergardenId, ReservationId},
        pet_kindergarden::PetKindergarden,
        reservation::{
            admission::{self, AdmissionInput, CancellationInput, Rejection},
            event::{CancelReservation, CreateReservation, ToggleAttendance},
            AdmittedReservation, Reservation,
        },
    },
    repository::reservation::ReservationRepository,
};
use shared::error::{AppError, AppResult};
use sqlx::{Postgres, Transaction};

// 予約一覧・詳細で共通の SELECT 句
macro_rules! select_reservations {
    ($($tail:literal),*) => {
        concat!(
            r#"
                SELECT
                    r.reservation_id, r.pet_kindergarden_id,
                    r.customer_id, c.name AS customer_name,
                    r.customer_pet_id, p.name AS customer_pet_name,
                    r.customer_ticket_id, r.ticket_type, r.reserved_date,
                    r.attendance_time, r.usage_hours, r.attendance, r.is_cancelled,
                    r.reserved_at, r.updated_reserved_at
                FROM reservations AS r
                INNER JOIN customers AS c ON r.customer_id = c.customer_id
                INNER JOIN customer_pets AS p ON r.customer_pet_id = p.customer_pet_id
            "#,
            $($tail),*
        )
    };
}

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn create(&self, event: CreateReservation) -> AppResult<AdmittedReservation> {
        retry_on_serialization_failure("create reservation", || self.try_create(&event)).await
    }

    async fn cancel(&self, event: CancelReservation) -> AppResult<()> {
        retry_on_serialization_failure("cancel reservation", || self.try_cancel(&event)).await
    }

    async fn toggle_attendance(&self, event: ToggleAttendance) -> AppResult<Reservation> {
        retry_on_serialization_failure("toggle attendance", || {
            self.try_toggle_attendance(&event)
        })
        .await
    }

    async fn find_by_id(
        &self,
        pet_kindergarden_id: PetKindergardenId,
        reservation_id: ReservationId,
    ) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, ReservationRow>(select_reservations!(
            "WHERE r.reservation_id = $1 AND r.pet_kindergarden_id = $2"
        ))
        .bind(reservation_id)
        .bind(pet_kindergarden_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(Reservation::try_from)
        .transpose()
    }

    async fn find_by_reserved_date(
        &self,
        pet_kindergarden_id: PetKindergardenId,
        reserved_date: NaiveDate,
    ) -> AppResult<Vec<Reservation>> {
        sqlx::query_as::<_, ReservationRow>(select_reservations!(
            "WHERE r.pet_kindergarden_id = $1 AND r.reserved_date = $2 ",
            "ORDER BY r.is_cancelled ASC, r.attendance_time ASC, r.reserved_at ASC"
        ))
        .bind(pet_kindergarden_id)
        .bind(reserved_date)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(Reservation::try_from)
        .collect()
    }

    async fn find_by_customer_id(
        &self,
        pet_kindergarden_id: PetKindergardenId,
        customer_id: CustomerId,
    ) -> AppResult<Vec<Reservation>> {
        sqlx::query_as::<_, ReservationRow>(select_reservations!(
            "WHERE r.pet_kindergarden_id = $1 AND r.customer_id = $2 ",
            "ORDER BY r.reserved_date DESC, r.attendance_time DESC"
        ))
        .bind(pet_kindergarden_id)
        .bind(customer_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(Reservation::try_from)
        .collect()
    }
}

impl ReservationRepositoryImpl {
    // 1 回分の予約作成。直列化失敗時は呼び出し側でやり直す
    async fn try_create(&self, event: &CreateReservation) -> AppResult<AdmittedReservation> {
        let mut tx = self.db.begin_serializable().await?;
        let visit = &event.visit;

        let pet_kindergarden = find_pet_kindergarden(&mut tx, event.pet_kindergarden_id).await?;
        ensure_customer_pet(
            &mut tx,
            event.pet_kindergarden_id,
            event.customer_id,
            event.customer_pet_id,
        )
        .await?;

        // ロック順は顧客チケット → 集計行で統一する
        let customer_ticket =
            lock_customer_ticket(&mut tx, event.pet_kindergarden_id, event.customer_ticket_id)
                .await?;
        let day_status =
            find_day_status(&mut tx, event.pet_kindergarden_id, visit.reserved_date).await?;
        let has_active_reservation: bool = sqlx::query_scalar(
            r#"
                SELECT EXISTS (
                    SELECT 1 FROM reservations
                    WHERE customer_pet_id = $1 AND reserved_date = $2 AND is_cancelled = FALSE
                )
            "#,
        )
        .bind(event.customer_pet_id)
        .bind(visit.reserved_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        let daily_reservation =
            lock_daily_reservation(&mut tx, event.pet_kindergarden_id, visit.reserved_date)
                .await?;

        let admitted = admission::admit(AdmissionInput {
            pet_kindergarden: &pet_kindergarden,
            customer_id: event.customer_id,
            visit,
            day_status: &day_status,
            has_active_reservation,
            daily_reservation,
            customer_ticket,
            requested_at: event.requested_at,
        })?;

        let reservation_id = ReservationId::new();
        sqlx::query(
            r#"
                INSERT INTO reservations (
                    reservation_id, pet_kindergarden_id, customer_id, customer_pet_id,
                    customer_ticket_id, ticket_type, reserved_date, attendance_time,
                    usage_hours, attendance, is_cancelled, reserved_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NULL, FALSE, $10)
            "#,
        )
        .bind(reservation_id)
        .bind(event.pet_kindergarden_id)
        .bind(event.customer_id)
        .bind(event.customer_pet_id)
        .bind(event.customer_ticket_id)
        .bind(visit.ticket_type.as_ref())
        .bind(visit.reserved_date)
        .bind(visit.attendance_time)
        .bind(visit.usage_hours)
        .bind(event.requested_at.with_timezone(&Utc))
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)
        .map_err(|e| {
            // 同時に作られた同じペット・同じ日の予約は部分一意インデックスで弾かれる
            if e.is_unique_violation() {
                AppError::from(Rejection::DuplicateReservation(visit.reserved_date))
            } else {
                e
            }
        })?;

        save_daily_reservation(&mut tx, &admitted.daily_reservation).await?;
        save_used_count(&mut tx, &admitted.customer_ticket).await?;

        let reservation = find_reservation(&mut tx, event.pet_kindergarden_id, reservation_id)
            .await?
            .ok_or_else(|| {
                AppError::NoRowsAffectedError("No reservation record has been created".into())
            })?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(
            reservation_id = %reservation.reservation_id,
            reserved_date = %reservation.reserved_date,
            total_pet_count = admitted.daily_reservation.total_pet_count,
            "reservation admitted"
        );

        Ok(AdmittedReservation {
            reservation,
            remaining_ticket_count: admitted.customer_ticket.remaining_count(),
            daily_reservation: admitted.daily_reservation,
        })
    }

    async fn try_cancel(&self, event: &CancelReservation) -> AppResult<()> {
        let mut tx = self.db.begin_serializable().await?;

        let pet_kindergarden = find_pet_kindergarden(&mut tx, event.pet_kindergarden_id).await?;
        let reservation =
            lock_reservation(&mut tx, event.pet_kindergarden_id, event.reservation_id).await?;
        let customer_ticket = lock_customer_ticket(
            &mut tx,
            event.pet_kindergarden_id,
            reservation.customer_ticket_id,
        )
        .await?;
        let daily_reservation = lock_daily_reservation(
            &mut tx,
            event.pet_kindergarden_id,
            reservation.reserved_date,
        )
        .await?;

        let cancelled = admission::cancel(CancellationInput {
            pet_kindergarden: &pet_kindergarden,
            reservation: &reservation,
            daily_reservation,
            customer_ticket,
            requested_at: event.requested_at,
        })?;

        sqlx::query(
            r#"
                UPDATE reservations
                SET is_cancelled = TRUE, updated_reserved_at = $2
                WHERE reservation_id = $1
            "#,
        )
        .bind(reservation.reservation_id)
        .bind(event.requested_at.with_timezone(&Utc))
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        save_daily_reservation(&mut tx, &cancelled.daily_reservation).await?;
        save_used_count(&mut tx, &cancelled.customer_ticket).await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(
            reservation_id = %reservation.reservation_id,
            reserved_date = %reservation.reserved_date,
            "reservation cancelled"
        );
        Ok(())
    }

    async fn try_toggle_attendance(&self, event: &ToggleAttendance) -> AppResult<Reservation> {
        let mut tx = self.db.begin_serializable().await?;

        let reservation =
            lock_reservation(&mut tx, event.pet_kindergarden_id, event.reservation_id).await?;
        let attendance = admission::toggle_attendance(&reservation, event.attendance)?;

        sqlx::query(
            r#"
                UPDATE reservations
                SET attendance = $2, updated_reserved_at = $3
                WHERE reservation_id = $1
            "#,
        )
        .bind(reservation.reservation_id)
        .bind(Option::<bool>::from(attendance))
        .bind(event.requested_at.with_timezone(&Utc))
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let updated = find_reservation(&mut tx, event.pet_kindergarden_id, event.reservation_id)
            .await?
            .ok_or_else(|| {
                AppError::NoRowsAffectedError("No reservation record has been updated".into())
            })?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(updated)
    }
}

async fn find_pet_kindergarden(
    tx: &mut Transaction<'_, Postgres>,
    pet_kindergarden_id: PetKindergardenId,
) -> AppResult<PetKindergarden> {
    sqlx::query_as::<_, PetKindergardenRow>(
        r#"
            SELECT
                pet_kindergarden_id, owner_id, name, phone_number, address,
                guide_message, business_hours, daily_pet_limit,
                reservation_availability_option, reservation_change_option,
                closed_on_special_days
            FROM pet_kindergardens
            WHERE pet_kindergarden_id = $1
        "#,
    )
    .bind(pet_kindergarden_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?
    .ok_or_else(|| {
        AppError::EntityNotFound(format!("Pet kindergarden ({pet_kindergarden_id}) not found."))
    })?
    .try_into()
}

async fn ensure_customer_pet(
    tx: &mut Transaction<'_, Postgres>,
    pet_kindergarden_id: PetKindergardenId,
    customer_id: CustomerId,
    customer_pet_id: CustomerPetId,
) -> AppResult<()> {
    let exists: bool = sqlx::query_scalar(
        r#"
            SELECT EXISTS (
                SELECT 1
                FROM customer_pets AS p
                INNER JOIN customers AS c ON p.customer_id = c.customer_id
                WHERE p.customer_pet_id = $1
                  AND c.customer_id = $2
                  AND c.pet_kindergarden_id = $3
            )
        "#,
    )
    .bind(customer_pet_id)
    .bind(customer_id)
    .bind(pet_kindergarden_id)
    .fetch_one(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?;

    if !exists {
        return Err(AppError::EntityNotFound(format!(
            "Customer pet ({customer_pet_id}) not found."
        )));
    }
    Ok(())
}

// 顧客チケットを行ロックして読み出す。発行元チケットの情報も結合する
async fn lock_customer_ticket(
    tx: &mut Transaction<'_, Postgres>,
    pet_kindergarden_id: PetKindergardenId,
    customer_ticket_id: CustomerTicketId,
) -> AppResult<CustomerTicket> {
    sqlx::query_as::<_, CustomerTicketRow>(
        r#"
            SELECT
                ct.customer_ticket_id, ct.customer_id, ct.ticket_id,
                t.ticket_type, t.usage_time_count, t.deleted_at,
                ct.total_count, ct.used_count, ct.expired_at, ct.created_at
            FROM customer_tickets AS ct
            INNER JOIN tickets AS t ON ct.ticket_id = t.ticket_id
            WHERE ct.customer_ticket_id = $1 AND t.pet_kindergarden_id = $2
            FOR UPDATE OF ct
        "#,
    )
    .bind(customer_ticket_id)
    .bind(pet_kindergarden_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?
    .ok_or_else(|| AppError::from(TicketRejection::NotFound))?
    .try_into()
}

async fn save_used_count(
    tx: &mut Transaction<'_, Postgres>,
    customer_ticket: &CustomerTicket,
) -> AppResult<()> {
    let res = sqlx::query(
        r#"
            UPDATE customer_tickets
            SET used_count = $2
            WHERE customer_ticket_id = $1
        "#,
    )
    .bind(customer_ticket.customer_ticket_id)
    .bind(customer_ticket.used_count)
    .execute(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?;

    if res.rows_affected() < 1 {
        return Err(AppError::NoRowsAffectedError(
            "No customer ticket record has been updated".into(),
        ));
    }
    Ok(())
}

async fn find_day_status(
    tx: &mut Transaction<'_, Postgres>,
    pet_kindergarden_id: PetKindergardenId,
    date: NaiveDate,
) -> AppResult<DayStatus> {
    let day_off = sqlx::query_as::<_, DayOffRow>(
        r#"
            SELECT day_off_id, pet_kindergarden_id, day_off_at
            FROM day_offs
            WHERE pet_kindergarden_id = $1 AND day_off_at = $2
        "#,
    )
    .bind(pet_kindergarden_id)
    .bind(date)
    .fetch_optional(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?;

    let special_day = sqlx::query_as::<_, SpecialDayRow>(
        r#"
            SELECT special_day_date, name
            FROM special_days
            WHERE special_day_date = $1
        "#,
    )
    .bind(date)
    .fetch_optional(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?;

    Ok(DayStatus {
        day_off: day_off.map(Into::into),
        special_day: special_day.map(Into::into),
    })
}

async fn find_reservation(
    tx: &mut Transaction<'_, Postgres>,
    pet_kindergarden_id: PetKindergardenId,
    reservation_id: ReservationId,
) -> AppResult<Option<Reservation>> {
    sqlx::query_as::<_, ReservationRow>(select_reservations!(
        "WHERE r.reservation_id = $1 AND r.pet_kindergarden_id = $2"
    ))
    .bind(reservation_id)
    .bind(pet_kindergarden_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?
    .map(Reservation::try_from)
    .transpose()
}

async fn lock_reservation(
    tx: &mut Transaction<'_, Postgres>,
    pet_kindergarden_id: PetKindergardenId,
    reservation_id: ReservationId,
) -> AppResult<Reservation> {
    sqlx::query_as::<_, ReservationRow>(select_reservations!(
        "WHERE r.reservation_id = $1 AND r.pet_kindergarden_id = $2 ",
        "FOR UPDATE OF r"
    ))
    .bind(reservation_id)
    .bind(pet_kindergarden_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?
    .ok_or_else(|| AppError::EntityNotFound(format!("Reservation ({reservation_id}) not found.")))?
    .try_into()
}
