//! 予約の受付・取消・出席切り替えの判定。
//!
//! ここでは DB に触れず、トランザクション内でロックを取って読み出した
//! 集計行・顧客チケットを受け取り、更新後の値を返すだけにしている。
//! 書き戻しとコミットは adapter 側の責務。

use crate::model::{
    calendar::{resolve_opening, ClosedReason, DayStatus, Visit},
    customer::{CustomerTicket, TicketRejection},
    daily_reservation::{CapacityRejection, DailyReservation},
    id::CustomerId,
    pet_kindergarden::PetKindergarden,
    reservation::{Attendance, Reservation, ReservationStatus},
};
use chrono::{DateTime, Local, NaiveDate, Utc};
use shared::error::{AppError, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error(transparent)]
    Closed(#[from] ClosedReason),
    #[error(transparent)]
    Ticket(#[from] TicketRejection),
    #[error(transparent)]
    Capacity(#[from] CapacityRejection),
    #[error("The customer pet already has a reservation on {0}.")]
    DuplicateReservation(NaiveDate),
    #[error("The reservation has already been cancelled.")]
    AlreadyCancelled,
    #[error("The reservation on {0} can no longer be changed.")]
    ChangeWindowElapsed(NaiveDate),
    #[error("Attendance can only be changed on active reservations.")]
    NotActive,
}

impl From<Rejection> for AppError {
    fn from(value: Rejection) -> Self {
        let (kind, code) = match value {
            Rejection::Closed(reason) => return reason.into(),
            Rejection::Ticket(rejection) => return rejection.into(),
            Rejection::Capacity(rejection) => return rejection.into(),
            Rejection::DuplicateReservation(_) => (
                ErrorKind::AlreadyExists,
                "reservation_already_exists_customer_pet",
            ),
            Rejection::AlreadyCancelled => (ErrorKind::Conflict, "reservation_already_cancelled"),
            Rejection::ChangeWindowElapsed(_) => {
                (ErrorKind::Conflict, "reservation_change_window_elapsed")
            }
            Rejection::NotActive => (ErrorKind::Conflict, "reservation_not_active"),
        };
        AppError::rejected(kind, code, value.to_string())
    }
}

/// 受付判定に必要な、トランザクション内で読み出した状態
#[derive(Debug)]
pub struct AdmissionInput<'a> {
    pub pet_kindergarden: &'a PetKindergarden,
    pub customer_id: CustomerId,
    pub visit: &'a Visit,
    pub day_status: &'a DayStatus,
    // 同じペット・同じ日に有効な予約がすでにあるか
    pub has_active_reservation: bool,
    pub daily_reservation: DailyReservation,
    pub customer_ticket: CustomerTicket,
    pub requested_at: DateTime<Local>,
}

/// 受付が通った場合の更新後の集計とチケット
#[derive(Debug)]
pub struct Admission {
    pub daily_reservation: DailyReservation,
    pub customer_ticket: CustomerTicket,
}

/// 重複 → 営業日 → チケット → 定員 の順に確認し、集計とチケット残数を進める
pub fn admit(input: AdmissionInput<'_>) -> Result<Admission, Rejection> {
    let AdmissionInput {
        pet_kindergarden,
        customer_id,
        visit,
        day_status,
        has_active_reservation,
        mut daily_reservation,
        mut customer_ticket,
        requested_at,
    } = input;

    if has_active_reservation {
        return Err(Rejection::DuplicateReservation(visit.reserved_date));
    }

    resolve_opening(
        pet_kindergarden,
        visit,
        day_status,
        requested_at.date_naive(),
    )?;

    customer_ticket.validate_for(customer_id, visit, requested_at.with_timezone(&Utc))?;

    daily_reservation.admit(visit.ticket_type, pet_kindergarden.daily_pet_limit)?;
    customer_ticket.consume()?;

    Ok(Admission {
        daily_reservation,
        customer_ticket,
    })
}

#[derive(Debug)]
pub struct CancellationInput<'a> {
    pub pet_kindergarden: &'a PetKindergarden,
    pub reservation: &'a Reservation,
    pub daily_reservation: DailyReservation,
    pub customer_ticket: CustomerTicket,
    pub requested_at: DateTime<Local>,
}

#[derive(Debug)]
pub struct Cancellation {
    pub daily_reservation: DailyReservation,
    pub customer_ticket: CustomerTicket,
}

/// 変更可能期間内の有効な予約だけ取り消せる。
/// 取り消すと定員枠とチケット残数が予約前の値に戻る
pub fn cancel(input: CancellationInput<'_>) -> Result<Cancellation, Rejection> {
    let CancellationInput {
        pet_kindergarden,
        reservation,
        mut daily_reservation,
        mut customer_ticket,
        requested_at,
    } = input;

    if reservation.status == ReservationStatus::Cancelled {
        return Err(Rejection::AlreadyCancelled);
    }
    if !pet_kindergarden
        .reservation_change_option
        .is_open_on(reservation.reserved_date, requested_at.date_naive())
    {
        return Err(Rejection::ChangeWindowElapsed(reservation.reserved_date));
    }

    daily_reservation.release(reservation.ticket_type)?;
    customer_ticket.restore()?;

    Ok(Cancellation {
        daily_reservation,
        customer_ticket,
    })
}

/// 出席状態を決める。定員やチケットには影響しない
pub fn toggle_attendance(
    reservation: &Reservation,
    requested: Option<Attendance>,
) -> Result<Attendance, Rejection> {
    if !reservation.is_active() {
        return Err(Rejection::NotActive);
    }
    Ok(requested.unwrap_or_else(|| reservation.attendance.next()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        calendar::tests::{date, pet_kindergarden, visit_at},
        day_off::DayOff,
        id::{CustomerPetId, CustomerTicketId, DayOffId, ReservationId, TicketId},
        reservation::{ReservationCustomer, ReservationPet},
        ticket::{TicketLifecycle, TicketType},
    };
    use chrono::TimeZone;
    use rstest::rstest;

    fn requested_at(day: &str) -> DateTime<Local> {
        let d = date(day);
        Local
            .from_local_datetime(&d.and_hms_opt(9, 0, 0).unwrap())
            .unwrap()
    }

    fn customer_ticket(customer_id: CustomerId, ticket_type: TicketType) -> CustomerTicket {
        CustomerTicket {
            customer_ticket_id: CustomerTicketId::new(),
            customer_id,
            ticket_id: TicketId::new(),
            ticket_type,
            usage_time_count: 4,
            ticket_lifecycle: TicketLifecycle::Active,
            total_count: 5,
            used_count: 0,
            expired_at: Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn reservation_of(kg: &PetKindergarden, visit: &Visit, ticket: &CustomerTicket) -> Reservation {
        Reservation {
            reservation_id: ReservationId::new(),
            pet_kindergarden_id: kg.pet_kindergarden_id,
            customer: ReservationCustomer {
                customer_id: ticket.customer_id,
                name: "Kim".into(),
            },
            customer_pet: ReservationPet {
                customer_pet_id: CustomerPetId::new(),
                name: "Choco".into(),
            },
            customer_ticket_id: ticket.customer_ticket_id,
            ticket_type: visit.ticket_type,
            reserved_date: visit.reserved_date,
            attendance_time: visit.attendance_time,
            usage_hours: visit.usage_hours,
            attendance: Attendance::Unset,
            status: ReservationStatus::Active,
            reserved_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
            updated_reserved_at: None,
        }
    }

    #[test]
    fn second_pet_is_refused_when_the_only_slot_is_taken() {
        let kg = pet_kindergarden(1);
        let visit = visit_at("2024-05-10", "10:00", TicketType::AllDay);
        let status = DayStatus::default();
        let daily = DailyReservation::empty(kg.pet_kindergarden_id, visit.reserved_date);

        let first_customer = CustomerId::new();
        let first = admit(AdmissionInput {
            pet_kindergarden: &kg,
            customer_id: first_customer,
            visit: &visit,
            day_status: &status,
            has_active_reservation: false,
            daily_reservation: daily,
            customer_ticket: customer_ticket(first_customer, TicketType::AllDay),
            requested_at: requested_at("2024-05-01"),
        })
        .unwrap();
        assert_eq!(first.daily_reservation.total_pet_count, 1);
        assert_eq!(first.customer_ticket.remaining_count(), 4);

        let second_customer = CustomerId::new();
        let err = admit(AdmissionInput {
            pet_kindergarden: &kg,
            customer_id: second_customer,
            visit: &visit,
            day_status: &status,
            has_active_reservation: false,
            daily_reservation: first.daily_reservation.clone(),
            customer_ticket: customer_ticket(second_customer, TicketType::AllDay),
            requested_at: requested_at("2024-05-01"),
        })
        .unwrap_err();
        assert_eq!(
            err,
            Rejection::Capacity(CapacityRejection::OverDailyLimit { limit: 1 })
        );
        assert_eq!(AppError::from(err).kind(), ErrorKind::Conflict);
    }

    #[test]
    fn duplicate_booking_is_already_exists() {
        let kg = pet_kindergarden(10);
        let visit = visit_at("2024-05-10", "10:00", TicketType::Time);
        let customer_id = CustomerId::new();
        let err = admit(AdmissionInput {
            pet_kindergarden: &kg,
            customer_id,
            visit: &visit,
            day_status: &DayStatus::default(),
            has_active_reservation: true,
            daily_reservation: DailyReservation::empty(kg.pet_kindergarden_id, visit.reserved_date),
            customer_ticket: customer_ticket(customer_id, TicketType::Time),
            requested_at: requested_at("2024-05-01"),
        })
        .unwrap_err();
        assert_eq!(err, Rejection::DuplicateReservation(date("2024-05-10")));

        let err = AppError::from(err);
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(err.code(), "reservation_already_exists_customer_pet");
    }

    #[test]
    fn day_off_rejection_is_specific() {
        let kg = pet_kindergarden(10);
        let visit = visit_at("2024-05-10", "10:00", TicketType::AllDay);
        let customer_id = CustomerId::new();
        let status = DayStatus {
            day_off: Some(DayOff {
                day_off_id: DayOffId::new(),
                pet_kindergarden_id: kg.pet_kindergarden_id,
                day_off_at: visit.reserved_date,
            }),
            special_day: None,
        };
        let err = admit(AdmissionInput {
            pet_kindergarden: &kg,
            customer_id,
            visit: &visit,
            day_status: &status,
            has_active_reservation: false,
            daily_reservation: DailyReservation::empty(kg.pet_kindergarden_id, visit.reserved_date),
            customer_ticket: customer_ticket(customer_id, TicketType::AllDay),
            requested_at: requested_at("2024-05-01"),
        })
        .unwrap_err();
        assert_eq!(err, Rejection::Closed(ClosedReason::DayOff(date("2024-05-10"))));
        assert_eq!(AppError::from(err).code(), "pet_kindergarden_closed_day_off");
    }

    #[test]
    fn exhausted_ticket_leaves_capacity_untouched() {
        let kg = pet_kindergarden(10);
        let visit = visit_at("2024-05-10", "10:00", TicketType::Hotel);
        let customer_id = CustomerId::new();
        let mut ticket = customer_ticket(customer_id, TicketType::Hotel);
        ticket.used_count = ticket.total_count;
        let err = admit(AdmissionInput {
            pet_kindergarden: &kg,
            customer_id,
            visit: &visit,
            day_status: &DayStatus::default(),
            has_active_reservation: false,
            daily_reservation: DailyReservation::empty(kg.pet_kindergarden_id, visit.reserved_date),
            customer_ticket: ticket,
            requested_at: requested_at("2024-05-01"),
        })
        .unwrap_err();
        assert_eq!(err, Rejection::Ticket(TicketRejection::NoCount));
    }

    #[test]
    fn cancelling_restores_capacity_and_ticket_exactly() {
        let kg = pet_kindergarden(3);
        let visit = visit_at("2024-05-10", "10:00", TicketType::Time);
        let customer_id = CustomerId::new();
        let before_daily = DailyReservation::empty(kg.pet_kindergarden_id, visit.reserved_date);
        let before_ticket = customer_ticket(customer_id, TicketType::Time);

        let admitted = admit(AdmissionInput {
            pet_kindergarden: &kg,
            customer_id,
            visit: &visit,
            day_status: &DayStatus::default(),
            has_active_reservation: false,
            daily_reservation: before_daily.clone(),
            customer_ticket: before_ticket.clone(),
            requested_at: requested_at("2024-05-01"),
        })
        .unwrap();
        let reservation = reservation_of(&kg, &visit, &before_ticket);

        let cancelled = cancel(CancellationInput {
            pet_kindergarden: &kg,
            reservation: &reservation,
            daily_reservation: admitted.daily_reservation,
            customer_ticket: admitted.customer_ticket,
            requested_at: requested_at("2024-05-02"),
        })
        .unwrap();
        assert_eq!(cancelled.daily_reservation, before_daily);
        assert_eq!(cancelled.customer_ticket.used_count, before_ticket.used_count);
        assert!(cancelled.daily_reservation.is_consistent_with(kg.daily_pet_limit));
    }

    #[rstest]
    // 前日まで変更可能なので当日は不可
    #[case("2024-05-10")]
    #[case("2024-05-11")]
    fn cancelling_after_the_change_window_is_a_conflict(#[case] today: &str) {
        let kg = pet_kindergarden(3);
        let visit = visit_at("2024-05-10", "10:00", TicketType::AllDay);
        let customer_id = CustomerId::new();
        let ticket = customer_ticket(customer_id, TicketType::AllDay);
        let mut daily = DailyReservation::empty(kg.pet_kindergarden_id, visit.reserved_date);
        daily.admit(TicketType::AllDay, 3).unwrap();
        let reservation = reservation_of(&kg, &visit, &ticket);

        let err = cancel(CancellationInput {
            pet_kindergarden: &kg,
            reservation: &reservation,
            daily_reservation: daily,
            customer_ticket: ticket,
            requested_at: requested_at(today),
        })
        .unwrap_err();
        assert_eq!(err, Rejection::ChangeWindowElapsed(date("2024-05-10")));
        assert_eq!(AppError::from(err).kind(), ErrorKind::Conflict);
        assert!(reservation.is_active());
    }

    #[test]
    fn cancelled_reservations_cannot_be_cancelled_again() {
        let kg = pet_kindergarden(3);
        let visit = visit_at("2024-05-10", "10:00", TicketType::AllDay);
        let ticket = customer_ticket(CustomerId::new(), TicketType::AllDay);
        let mut reservation = reservation_of(&kg, &visit, &ticket);
        reservation.status = ReservationStatus::Cancelled;

        let err = cancel(CancellationInput {
            pet_kindergarden: &kg,
            reservation: &reservation,
            daily_reservation: DailyReservation::empty(kg.pet_kindergarden_id, visit.reserved_date),
            customer_ticket: ticket,
            requested_at: requested_at("2024-05-01"),
        })
        .unwrap_err();
        assert_eq!(err, Rejection::AlreadyCancelled);
    }

    #[rstest]
    #[case(Attendance::Unset, None, Attendance::Present)]
    #[case(Attendance::Present, None, Attendance::Absent)]
    #[case(Attendance::Absent, None, Attendance::Present)]
    #[case(Attendance::Present, Some(Attendance::Unset), Attendance::Unset)]
    fn attendance_toggles(
        #[case] current: Attendance,
        #[case] requested: Option<Attendance>,
        #[case] expected: Attendance,
    ) {
        let kg = pet_kindergarden(3);
        let visit = visit_at("2024-05-10", "10:00", TicketType::AllDay);
        let ticket = customer_ticket(CustomerId::new(), TicketType::AllDay);
        let mut reservation = reservation_of(&kg, &visit, &ticket);
        reservation.attendance = current;

        assert_eq!(toggle_attendance(&reservation, requested), Ok(expected));
    }

    #[test]
    fn attendance_is_frozen_on_cancelled_reservations() {
        let kg = pet_kindergarden(3);
        let visit = visit_at("2024-05-10", "10:00", TicketType::AllDay);
        let ticket = customer_ticket(CustomerId::new(), TicketType::AllDay);
        let mut reservation = reservation_of(&kg, &visit, &ticket);
        reservation.status = ReservationStatus::Cancelled;

        assert_eq!(
            toggle_attendance(&reservation, None),
            Err(Rejection::NotActive)
        );
    }
}
