use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{PetKindergardenId, TicketId},
    ticket::{event::CreateTicket, Ticket, TicketType},
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorKind};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketTypeName {
    Time,
    AllDay,
    Hotel,
}

impl From<TicketType> for TicketTypeName {
    fn from(value: TicketType) -> Self {
        match value {
            TicketType::Time => Self::Time,
            TicketType::AllDay => Self::AllDay,
            TicketType::Hotel => Self::Hotel,
        }
    }
}

impl From<TicketTypeName> for TicketType {
    fn from(value: TicketTypeName) -> Self {
        match value {
            TicketTypeName::Time => Self::Time,
            TicketTypeName::AllDay => Self::AllDay,
            TicketTypeName::Hotel => Self::Hotel,
        }
    }
}

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    #[garde(skip)]
    ticket_type: TicketTypeName,
    #[garde(range(min = 1))]
    usage_count: i32,
    #[garde(range(min = 0, max = 24))]
    #[serde(default)]
    usage_time_count: i32,
    #[garde(range(min = 1))]
    usage_period_in_days_count: i32,
    #[garde(range(min = 0))]
    price: i32,
}

#[derive(new)]
pub struct CreateTicketRequestWithIds(PetKindergardenId, CreateTicketRequest);
impl TryFrom<CreateTicketRequestWithIds> for CreateTicket {
    type Error = AppError;

    fn try_from(value: CreateTicketRequestWithIds) -> Result<Self, Self::Error> {
        let CreateTicketRequestWithIds(
            pet_kindergarden_id,
            CreateTicketRequest {
                ticket_type,
                usage_count,
                usage_time_count,
                usage_period_in_days_count,
                price,
            },
        ) = value;
        // 時間券は 1 回あたりの利用時間が必須
        if ticket_type == TicketTypeName::Time && usage_time_count < 1 {
            return Err(AppError::rejected(
                ErrorKind::ValidationFailed,
                "ticket_usage_time_count_required",
                "A time ticket needs at least one usage hour.",
            ));
        }
        Ok(CreateTicket::new(
            pet_kindergarden_id,
            ticket_type.into(),
            usage_count,
            usage_time_count,
            usage_period_in_days_count,
            price,
        ))
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponse {
    pub ticket_id: TicketId,
    pub ticket_type: TicketTypeName,
    pub usage_count: i32,
    pub usage_time_count: i32,
    pub usage_period_in_days_count: i32,
    pub price: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Ticket> for TicketResponse {
    fn from(value: Ticket) -> Self {
        let Ticket {
            ticket_id,
            ticket_type,
            usage_count,
            usage_time_count,
            usage_period_in_days_count,
            price,
            created_at,
            ..
        } = value;
        Self {
            ticket_id,
            ticket_type: ticket_type.into(),
            usage_count,
            usage_time_count,
            usage_period_in_days_count,
            price,
            created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct TicketsResponse {
    pub items: Vec<TicketResponse>,
}

impl From<Vec<Ticket>> for TicketsResponse {
    fn from(value: Vec<Ticket>) -> Self {
        Self {
            items: value.into_iter().map(TicketResponse::from).collect(),
        }
    }
}
