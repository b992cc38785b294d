use crate::model::id::{CustomerId, CustomerPetId, PetKindergardenId};

pub mod event;
pub mod ticket;

pub use ticket::{CustomerTicket, TicketRejection};

#[derive(Debug, Clone)]
pub struct Customer {
    pub customer_id: CustomerId,
    pub pet_kindergarden_id: PetKindergardenId,
    pub name: String,
    pub phone_number: String,
    pub pets: Vec<CustomerPet>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerPet {
    pub customer_pet_id: CustomerPetId,
    pub customer_id: CustomerId,
    pub name: String,
    pub breed: Option<String>,
}
