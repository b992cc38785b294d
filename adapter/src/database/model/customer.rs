use super::parse_column;
use chrono::{DateTime, Utc};
use kernel::model::{
    customer::{Customer, CustomerPet, CustomerTicket},
    id::{CustomerId, CustomerPetId, CustomerTicketId, PetKindergardenId, TicketId},
    ticket::TicketLifecycle,
};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct CustomerRow {
    pub customer_id: CustomerId,
    pub pet_kindergarden_id: PetKindergardenId,
    pub name: String,
    pub phone_number: String,
}

impl CustomerRow {
    // ペットは別クエリで取得してから組み立てる
    pub fn into_customer(self, pets: Vec<CustomerPet>) -> Customer {
        let CustomerRow {
            customer_id,
            pet_kindergarden_id,
            name,
            phone_number,
        } = self;
        Customer {
            customer_id,
            pet_kindergarden_id,
            name,
            phone_number,
            pets,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct CustomerPetRow {
    pub customer_pet_id: CustomerPetId,
    pub customer_id: CustomerId,
    pub name: String,
    pub breed: Option<String>,
}

impl From<CustomerPetRow> for CustomerPet {
    fn from(value: CustomerPetRow) -> Self {
        let CustomerPetRow {
            customer_pet_id,
            customer_id,
            name,
            breed,
        } = value;
        CustomerPet {
            customer_pet_id,
            customer_id,
            name,
            breed,
        }
    }
}

// customer_tickets と tickets を結合した行
#[derive(sqlx::FromRow)]
pub struct CustomerTicketRow {
    pub customer_ticket_id: CustomerTicketId,
    pub customer_id: CustomerId,
    pub ticket_id: TicketId,
    pub ticket_type: String,
    pub usage_time_count: i32,
    pub deleted_at: Option<DateTime<Utc>>,
    pub total_count: i32,
    pub used_count: i32,
    pub expired_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<CustomerTicketRow> for CustomerTicket {
    type Error = AppError;

    fn try_from(value: CustomerTicketRow) -> Result<Self, Self::Error> {
        let CustomerTicketRow {
            customer_ticket_id,
            customer_id,
            ticket_id,
            ticket_type,
            usage_time_count,
            deleted_at,
            total_count,
            used_count,
            expired_at,
            created_at,
        } = value;
        Ok(CustomerTicket {
            customer_ticket_id,
            customer_id,
            ticket_id,
            ticket_type: parse_column("ticket_type", &ticket_type)?,
            usage_time_count,
            ticket_lifecycle: TicketLifecycle::from_deleted_at(deleted_at),
            total_count,
            used_count,
            expired_at,
            created_at,
        })
    }
}
