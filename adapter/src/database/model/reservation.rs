use super::parse_column;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use kernel::model::{
    id::{CustomerId, CustomerPetId, CustomerTicketId, PetKindergardenId, ReservationId},
    reservation::{Reservation, ReservationCustomer, ReservationPet, ReservationStatus},
};
use shared::error::AppError;

// reservations に顧客名・ペット名を結合した行
#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub reservation_id: ReservationId,
    pub pet_kindergarden_id: PetKindergardenId,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub customer_pet_id: CustomerPetId,
    pub customer_pet_name: String,
    pub customer_ticket_id: CustomerTicketId,
    pub ticket_type: String,
    pub reserved_date: NaiveDate,
    pub attendance_time: NaiveTime,
    pub usage_hours: Option<i32>,
    pub attendance: Option<bool>,
    pub is_cancelled: bool,
    pub reserved_at: DateTime<Utc>,
    pub updated_reserved_at: Option<DateTime<Utc>>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationRow) -> Result<Self, Self::Error> {
        let ReservationRow {
            reservation_id,
            pet_kindergarden_id,
            customer_id,
            customer_name,
            customer_pet_id,
            customer_pet_name,
            customer_ticket_id,
            ticket_type,
            reserved_date,
            attendance_time,
            usage_hours,
            attendance,
            is_cancelled,
            reserved_at,
            updated_reserved_at,
        } = value;
        Ok(Reservation {
            reservation_id,
            pet_kindergarden_id,
            customer: ReservationCustomer {
                customer_id,
                name: customer_name,
            },
            customer_pet: ReservationPet {
                customer_pet_id,
                name: customer_pet_name,
            },
            customer_ticket_id,
            ticket_type: parse_column("ticket_type", &ticket_type)?,
            reserved_date,
            attendance_time,
            usage_hours,
            attendance: attendance.into(),
            status: ReservationStatus::from_cancelled(is_cancelled),
            reserved_at,
            updated_reserved_at,
        })
    }
}
