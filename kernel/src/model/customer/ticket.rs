use crate::model::{
    calendar::Visit,
    id::{CustomerId, CustomerTicketId, TicketId},
    ticket::{TicketLifecycle, TicketType},
};
use chrono::{DateTime, Utc};
use shared::error::{AppError, ErrorKind};
use thiserror::Error;

/// 顧客に発行されたチケット。発行元チケットの種別・1 回あたりの時間・状態を写しとして持つ
#[derive(Debug, Clone)]
pub struct CustomerTicket {
    pub customer_ticket_id: CustomerTicketId,
    pub customer_id: CustomerId,
    pub ticket_id: TicketId,
    pub ticket_type: TicketType,
    pub usage_time_count: i32,
    pub ticket_lifecycle: TicketLifecycle,
    pub total_count: i32,
    pub used_count: i32,
    pub expired_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TicketRejection {
    #[error("Customer ticket not found.")]
    NotFound,
    #[error("The ticket has been deleted.")]
    Deleted,
    #[error("Customer ticket has expired.")]
    Expired,
    #[error("Customer ticket expires before the reservation date.")]
    ExpiresBeforeReservation,
    #[error("A {ticket:?} ticket cannot be used for a {requested:?} reservation.")]
    TypeMismatch {
        ticket: TicketType,
        requested: TicketType,
    },
    #[error("Customer ticket has no remaining count.")]
    NoCount,
    #[error("Usage hours are required for a time ticket.")]
    MissingUsageHours,
    #[error("Usage hours must be between 1 and {allowed}.")]
    InsufficientTime { allowed: i32 },
    #[error("Customer ticket count cannot be restored.")]
    NothingToRestore,
}

impl TicketRejection {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TicketRejection::NotFound => ErrorKind::NotFound,
            TicketRejection::NoCount | TicketRejection::NothingToRestore => ErrorKind::Conflict,
            _ => ErrorKind::ValidationFailed,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            TicketRejection::NotFound => "customer_ticket_not_found",
            TicketRejection::Deleted => "customer_ticket_deleted",
            TicketRejection::Expired => "customer_ticket_expired",
            TicketRejection::ExpiresBeforeReservation => "customer_ticket_invalid_expired_at",
            TicketRejection::TypeMismatch { .. } => "reservation_ticket_type_mismatch",
            TicketRejection::NoCount => "customer_ticket_no_count",
            TicketRejection::MissingUsageHours | TicketRejection::InsufficientTime { .. } => {
                "reservation_usage_hours_invalid"
            }
            TicketRejection::NothingToRestore => "customer_ticket_conflict",
        }
    }
}

impl From<TicketRejection> for AppError {
    fn from(value: TicketRejection) -> Self {
        AppError::rejected(value.kind(), value.code(), value.to_string())
    }
}

impl CustomerTicket {
    pub fn remaining_count(&self) -> i32 {
        self.total_count - self.used_count
    }

    /// 予約に使えるかを検証する。判定順は
    /// 所有者 → 削除 → 期限切れ → 予約日より前に失効 → 種別 → 残回数 → 利用時間
    pub fn validate_for(
        &self,
        customer_id: CustomerId,
        visit: &Visit,
        now: DateTime<Utc>,
    ) -> Result<(), TicketRejection> {
        if self.customer_id != customer_id {
            return Err(TicketRejection::NotFound);
        }
        if !self.ticket_lifecycle.is_active() {
            return Err(TicketRejection::Deleted);
        }
        if self.expired_at <= now {
            return Err(TicketRejection::Expired);
        }
        if visit.reserved_date > self.expired_at.date_naive() {
            return Err(TicketRejection::ExpiresBeforeReservation);
        }
        if self.ticket_type != visit.ticket_type {
            return Err(TicketRejection::TypeMismatch {
                ticket: self.ticket_type,
                requested: visit.ticket_type,
            });
        }
        if self.remaining_count() <= 0 {
            return Err(TicketRejection::NoCount);
        }
        if self.ticket_type == TicketType::Time {
            match visit.usage_hours {
                None => return Err(TicketRejection::MissingUsageHours),
                Some(hours) if hours < 1 || hours > self.usage_time_count => {
                    return Err(TicketRejection::InsufficientTime {
                        allowed: self.usage_time_count,
                    })
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    pub fn consume(&mut self) -> Result<(), TicketRejection> {
        if self.remaining_count() <= 0 {
            return Err(TicketRejection::NoCount);
        }
        self.used_count += 1;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<(), TicketRejection> {
        if self.used_count <= 0 {
            return Err(TicketRejection::NothingToRestore);
        }
        self.used_count -= 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, TimeZone};
    use rstest::{fixture, rstest};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    #[fixture]
    fn owner() -> CustomerId {
        CustomerId::new()
    }

    fn ticket(owner: CustomerId, ticket_type: TicketType) -> CustomerTicket {
        CustomerTicket {
            customer_ticket_id: CustomerTicketId::new(),
            customer_id: owner,
            ticket_id: TicketId::new(),
            ticket_type,
            usage_time_count: 4,
            ticket_lifecycle: TicketLifecycle::Active,
            total_count: 10,
            used_count: 0,
            expired_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            created_at: now(),
        }
    }

    fn visit(ticket_type: TicketType, usage_hours: Option<i32>) -> Visit {
        Visit {
            reserved_date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            attendance_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            ticket_type,
            usage_hours,
        }
    }

    #[rstest]
    fn accepts_a_matching_ticket(owner: CustomerId) {
        let t = ticket(owner, TicketType::AllDay);
        assert_eq!(t.validate_for(owner, &visit(TicketType::AllDay, None), now()), Ok(()));
    }

    #[rstest]
    fn rejects_someone_elses_ticket(owner: CustomerId) {
        let t = ticket(owner, TicketType::AllDay);
        assert_eq!(
            t.validate_for(CustomerId::new(), &visit(TicketType::AllDay, None), now()),
            Err(TicketRejection::NotFound)
        );
    }

    #[rstest]
    fn deleted_ticket_wins_over_expiry(owner: CustomerId) {
        let mut t = ticket(owner, TicketType::AllDay);
        t.ticket_lifecycle = TicketLifecycle::Deleted { deleted_at: now() };
        t.expired_at = now();
        assert_eq!(
            t.validate_for(owner, &visit(TicketType::AllDay, None), now()),
            Err(TicketRejection::Deleted)
        );
    }

    #[rstest]
    fn rejects_expired_ticket(owner: CustomerId) {
        let mut t = ticket(owner, TicketType::AllDay);
        t.expired_at = now();
        assert_eq!(
            t.validate_for(owner, &visit(TicketType::AllDay, None), now()),
            Err(TicketRejection::Expired)
        );
    }

    #[rstest]
    fn rejects_reservation_after_expiry_date(owner: CustomerId) {
        let mut t = ticket(owner, TicketType::AllDay);
        t.expired_at = Utc.with_ymd_and_hms(2024, 5, 9, 23, 0, 0).unwrap();
        assert_eq!(
            t.validate_for(owner, &visit(TicketType::AllDay, None), now()),
            Err(TicketRejection::ExpiresBeforeReservation)
        );
    }

    #[rstest]
    #[case(TicketType::Time, TicketType::AllDay)]
    #[case(TicketType::AllDay, TicketType::Hotel)]
    #[case(TicketType::Hotel, TicketType::Time)]
    fn rejects_type_mismatch(
        owner: CustomerId,
        #[case] ticket_type: TicketType,
        #[case] requested: TicketType,
    ) {
        let t = ticket(owner, ticket_type);
        assert_eq!(
            t.validate_for(owner, &visit(requested, Some(2)), now()),
            Err(TicketRejection::TypeMismatch {
                ticket: ticket_type,
                requested
            })
        );
    }

    #[rstest]
    fn rejects_exhausted_ticket(owner: CustomerId) {
        let mut t = ticket(owner, TicketType::Hotel);
        t.used_count = t.total_count;
        let err = t
            .validate_for(owner, &visit(TicketType::Hotel, None), now())
            .unwrap_err();
        assert_eq!(err, TicketRejection::NoCount);
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[rstest]
    #[case(None, Err(TicketRejection::MissingUsageHours))]
    #[case(Some(0), Err(TicketRejection::InsufficientTime { allowed: 4 }))]
    #[case(Some(5), Err(TicketRejection::InsufficientTime { allowed: 4 }))]
    #[case(Some(4), Ok(()))]
    fn time_tickets_check_usage_hours(
        owner: CustomerId,
        #[case] usage_hours: Option<i32>,
        #[case] expected: Result<(), TicketRejection>,
    ) {
        let t = ticket(owner, TicketType::Time);
        assert_eq!(
            t.validate_for(owner, &visit(TicketType::Time, usage_hours), now()),
            expected
        );
    }

    #[rstest]
    fn consume_then_restore_returns_to_start(owner: CustomerId) {
        let mut t = ticket(owner, TicketType::Time);
        t.consume().unwrap();
        assert_eq!(t.remaining_count(), 9);
        t.restore().unwrap();
        assert_eq!(t.remaining_count(), 10);
        assert_eq!(t.restore(), Err(TicketRejection::NothingToRestore));
    }
}
