use super::parse_column;
use chrono::{DateTime, Utc};
use kernel::model::{
    id::{PetKindergardenId, TicketId},
    ticket::{Ticket, TicketLifecycle},
};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct TicketRow {
    pub ticket_id: TicketId,
    pub pet_kindergarden_id: PetKindergardenId,
    pub ticket_type: String,
    pub usage_count: i32,
    pub usage_time_count: i32,
    pub usage_period_in_days_count: i32,
    pub price: i32,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = AppError;

    fn try_from(value: TicketRow) -> Result<Self, Self::Error> {
        let TicketRow {
            ticket_id,
            pet_kindergarden_id,
            ticket_type,
            usage_count,
            usage_time_count,
            usage_period_in_days_count,
            price,
            deleted_at,
            created_at,
        } = value;
        Ok(Ticket {
            ticket_id,
            pet_kindergarden_id,
            ticket_type: parse_column("ticket_type", &ticket_type)?,
            usage_count,
            usage_time_count,
            usage_period_in_days_count,
            price,
            lifecycle: TicketLifecycle::from_deleted_at(deleted_at),
            created_at,
        })
    }
}
