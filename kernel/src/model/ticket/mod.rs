use crate::model::id::{PetKindergardenId, TicketId};
use chrono::{DateTime, Utc};
use strum::{AsRefStr, EnumString};

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketType {
    Time,
    AllDay,
    Hotel,
}

/// 論理削除をフラグではなく状態として持つ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketLifecycle {
    Active,
    Deleted { deleted_at: DateTime<Utc> },
}

impl TicketLifecycle {
    pub fn from_deleted_at(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            Some(deleted_at) => TicketLifecycle::Deleted { deleted_at },
            None => TicketLifecycle::Active,
        }
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            TicketLifecycle::Active => None,
            TicketLifecycle::Deleted { deleted_at } => Some(*deleted_at),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, TicketLifecycle::Active)
    }
}

#[derive(Debug, Clone)]
pub struct Ticket {
    pub ticket_id: TicketId,
    pub pet_kindergarden_id: PetKindergardenId,
    pub ticket_type: TicketType,
    // 利用可能回数
    pub usage_count: i32,
    // 1 回あたりの利用可能時間（時間）
    pub usage_time_count: i32,
    pub usage_period_in_days_count: i32,
    pub price: i32,
    pub lifecycle: TicketLifecycle,
    pub created_at: DateTime<Utc>,
}
