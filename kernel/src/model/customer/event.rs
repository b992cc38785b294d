use crate::model::id::{CustomerId, PetKindergardenId, TicketId};
use chrono::{DateTime, Local};
use derive_new::new;

#[derive(new, Debug)]
pub struct CreateCustomer {
    pub pet_kindergarden_id: PetKindergardenId,
    pub name: String,
    pub phone_number: String,
    pub pets: Vec<CreateCustomerPet>,
}

#[derive(new, Debug)]
pub struct CreateCustomerPet {
    pub name: String,
    pub breed: Option<String>,
}

// 顧客へのチケット発行。有効期限は issued_at から起算する
#[derive(new, Debug)]
pub struct IssueCustomerTicket {
    pub pet_kindergarden_id: PetKindergardenId,
    pub customer_id: CustomerId,
    pub ticket_id: TicketId,
    pub issued_at: DateTime<Local>,
}
