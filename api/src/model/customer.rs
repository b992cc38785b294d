use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    customer::{
        event::{CreateCustomer, CreateCustomerPet},
        Customer, CustomerPet, CustomerTicket,
    },
    id::{CustomerId, CustomerPetId, CustomerTicketId, PetKindergardenId, TicketId},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ticket::TicketTypeName;

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerPetRequest {
    #[garde(length(min = 1, max = 255))]
    name: String,
    #[garde(skip)]
    breed: Option<String>,
}

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    #[garde(length(min = 1, max = 255))]
    name: String,
    #[garde(length(min = 1, max = 32))]
    phone_number: String,
    // ペットは 1 匹以上
    #[garde(length(min = 1), dive)]
    pets: Vec<CreateCustomerPetRequest>,
}

#[derive(new)]
pub struct CreateCustomerRequestWithIds(PetKindergardenId, CreateCustomerRequest);
impl From<CreateCustomerRequestWithIds> for CreateCustomer {
    fn from(value: CreateCustomerRequestWithIds) -> Self {
        let CreateCustomerRequestWithIds(
            pet_kindergarden_id,
            CreateCustomerRequest {
                name,
                phone_number,
                pets,
            },
        ) = value;
        CreateCustomer::new(
            pet_kindergarden_id,
            name,
            phone_number,
            pets.into_iter()
                .map(|CreateCustomerPetRequest { name, breed }| CreateCustomerPet::new(name, breed))
                .collect(),
        )
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPetResponse {
    pub customer_pet_id: CustomerPetId,
    pub name: String,
    pub breed: Option<String>,
}

impl From<CustomerPet> for CustomerPetResponse {
    fn from(value: CustomerPet) -> Self {
        let CustomerPet {
            customer_pet_id,
            name,
            breed,
            ..
        } = value;
        Self {
            customer_pet_id,
            name,
            breed,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub customer_id: CustomerId,
    pub name: String,
    pub phone_number: String,
    pub pets: Vec<CustomerPetResponse>,
}

impl From<Customer> for CustomerResponse {
    fn from(value: Customer) -> Self {
        let Customer {
            customer_id,
            name,
            phone_number,
            pets,
            ..
        } = value;
        Self {
            customer_id,
            name,
            phone_number,
            pets: pets.into_iter().map(CustomerPetResponse::from).collect(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct CustomersResponse {
    pub items: Vec<CustomerResponse>,
}

impl From<Vec<Customer>> for CustomersResponse {
    fn from(value: Vec<Customer>) -> Self {
        Self {
            items: value.into_iter().map(CustomerResponse::from).collect(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct CustomerPetsResponse {
    pub items: Vec<CustomerPetResponse>,
}

impl From<Vec<CustomerPet>> for CustomerPetsResponse {
    fn from(value: Vec<CustomerPet>) -> Self {
        Self {
            items: value.into_iter().map(CustomerPetResponse::from).collect(),
        }
    }
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueCustomerTicketRequest {
    pub ticket_id: TicketId,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerTicketResponse {
    pub customer_ticket_id: CustomerTicketId,
    pub ticket_id: TicketId,
    pub ticket_type: TicketTypeName,
    pub usage_time_count: i32,
    pub total_count: i32,
    pub used_count: i32,
    pub remaining_count: i32,
    pub is_ticket_deleted: bool,
    pub expired_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<CustomerTicket> for CustomerTicketResponse {
    fn from(value: CustomerTicket) -> Self {
        let remaining_count = value.remaining_count();
        let CustomerTicket {
            customer_ticket_id,
            ticket_id,
            ticket_type,
            usage_time_count,
            ticket_lifecycle,
            total_count,
            used_count,
            expired_at,
            created_at,
            ..
        } = value;
        Self {
            customer_ticket_id,
            ticket_id,
            ticket_type: ticket_type.into(),
            usage_time_count,
            total_count,
            used_count,
            remaining_count,
            is_ticket_deleted: !ticket_lifecycle.is_active(),
            expired_at,
            created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct CustomerTicketsResponse {
    pub items: Vec<CustomerTicketResponse>,
}

impl From<Vec<CustomerTicket>> for CustomerTicketsResponse {
    fn from(value: Vec<CustomerTicket>) -> Self {
        Self {
            items: value.into_iter().map(CustomerTicketResponse::from).collect(),
        }
    }
}
