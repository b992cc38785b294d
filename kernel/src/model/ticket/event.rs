use crate::model::{
    id::{PetKindergardenId, TicketId},
    ticket::TicketType,
};
use derive_new::new;

#[derive(new, Debug)]
pub struct CreateTicket {
    pub pet_kindergarden_id: PetKindergardenId,
    pub ticket_type: TicketType,
    pub usage_count: i32,
    pub usage_time_count: i32,
    pub usage_period_in_days_count: i32,
    pub price: i32,
}

#[derive(new, Debug)]
pub struct DeleteTicket {
    pub pet_kindergarden_id: PetKindergardenId,
    pub ticket_id: TicketId,
}
