use crate::model::{
    daily_reservation::DailyReservation,
    id::{CustomerId, CustomerPetId, CustomerTicketId, PetKindergardenId, ReservationId},
    ticket::TicketType,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

pub mod admission;
pub mod event;

/// 出席状態。DB 上は NULL / TRUE / FALSE の 3 値で持つ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Attendance {
    #[default]
    Unset,
    Present,
    Absent,
}

impl Attendance {
    /// 明示的な指定がないときの切り替え順
    pub fn next(self) -> Self {
        match self {
            Attendance::Unset | Attendance::Absent => Attendance::Present,
            Attendance::Present => Attendance::Absent,
        }
    }
}

impl From<Option<bool>> for Attendance {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Attendance::Unset,
            Some(true) => Attendance::Present,
            Some(false) => Attendance::Absent,
        }
    }
}

impl From<Attendance> for Option<bool> {
    fn from(value: Attendance) -> Self {
        match value {
            Attendance::Unset => None,
            Attendance::Present => Some(true),
            Attendance::Absent => Some(false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    Active,
    Cancelled,
}

impl ReservationStatus {
    pub fn from_cancelled(is_cancelled: bool) -> Self {
        if is_cancelled {
            ReservationStatus::Cancelled
        } else {
            ReservationStatus::Active
        }
    }
}

#[derive(Debug, Clone)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub pet_kindergarden_id: PetKindergardenId,
    pub customer: ReservationCustomer,
    pub customer_pet: ReservationPet,
    pub customer_ticket_id: CustomerTicketId,
    pub ticket_type: TicketType,
    pub reserved_date: NaiveDate,
    pub attendance_time: NaiveTime,
    pub usage_hours: Option<i32>,
    pub attendance: Attendance,
    pub status: ReservationStatus,
    pub reserved_at: DateTime<Utc>,
    pub updated_reserved_at: Option<DateTime<Utc>>,
}

impl Reservation {
    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }
}

#[derive(Debug, Clone)]
pub struct ReservationCustomer {
    pub customer_id: CustomerId,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct ReservationPet {
    pub customer_pet_id: CustomerPetId,
    pub name: String,
}

/// 予約作成の結果。作成後の当日集計とチケット残数も返す
#[derive(Debug, Clone)]
pub struct AdmittedReservation {
    pub reservation: Reservation,
    pub daily_reservation: DailyReservation,
    pub remaining_ticket_count: i32,
}
