use crate::model::{id::PetKindergardenId, ticket::TicketType};
use chrono::NaiveDate;
use shared::error::{AppError, ErrorKind};
use thiserror::Error;

/// 園・日付ごとの予約数の集計。
/// total_pet_count は常に種別ごとの合計と等しく、0 以上かつ上限以下
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReservation {
    pub pet_kindergarden_id: PetKindergardenId,
    pub reserved_date: NaiveDate,
    pub total_pet_count: i32,
    pub time_pet_count: i32,
    pub all_day_pet_count: i32,
    pub hotel_pet_count: i32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CapacityRejection {
    #[error("The daily pet limit ({limit}) has been reached.")]
    OverDailyLimit { limit: i32 },
    #[error("No {0:?} reservation is counted for this day.")]
    Underflow(TicketType),
}

impl From<CapacityRejection> for AppError {
    fn from(value: CapacityRejection) -> Self {
        let code = match value {
            CapacityRejection::OverDailyLimit { .. } => "customer_pet_over_daily_limit",
            CapacityRejection::Underflow(_) => "daily_reservation_conflict",
        };
        AppError::rejected(ErrorKind::Conflict, code, value.to_string())
    }
}

impl DailyReservation {
    pub fn empty(pet_kindergarden_id: PetKindergardenId, reserved_date: NaiveDate) -> Self {
        Self {
            pet_kindergarden_id,
            reserved_date,
            total_pet_count: 0,
            time_pet_count: 0,
            all_day_pet_count: 0,
            hotel_pet_count: 0,
        }
    }

    pub fn count_of(&self, ticket_type: TicketType) -> i32 {
        match ticket_type {
            TicketType::Time => self.time_pet_count,
            TicketType::AllDay => self.all_day_pet_count,
            TicketType::Hotel => self.hotel_pet_count,
        }
    }

    fn count_of_mut(&mut self, ticket_type: TicketType) -> &mut i32 {
        match ticket_type {
            TicketType::Time => &mut self.time_pet_count,
            TicketType::AllDay => &mut self.all_day_pet_count,
            TicketType::Hotel => &mut self.hotel_pet_count,
        }
    }

    pub fn can_admit(&self, daily_pet_limit: i32) -> bool {
        self.total_pet_count < daily_pet_limit
    }

    pub fn admit(
        &mut self,
        ticket_type: TicketType,
        daily_pet_limit: i32,
    ) -> Result<(), CapacityRejection> {
        if !self.can_admit(daily_pet_limit) {
            return Err(CapacityRejection::OverDailyLimit {
                limit: daily_pet_limit,
            });
        }
        *self.count_of_mut(ticket_type) += 1;
        self.total_pet_count += 1;
        Ok(())
    }

    pub fn release(&mut self, ticket_type: TicketType) -> Result<(), CapacityRejection> {
        let count = self.count_of_mut(ticket_type);
        if *count <= 0 {
            return Err(CapacityRejection::Underflow(ticket_type));
        }
        *count -= 1;
        self.total_pet_count -= 1;
        Ok(())
    }

    pub fn is_consistent_with(&self, daily_pet_limit: i32) -> bool {
        let sum = self.time_pet_count + self.all_day_pet_count + self.hotel_pet_count;
        self.total_pet_count == sum
            && (0..=daily_pet_limit).contains(&self.total_pet_count)
            && [
                self.time_pet_count,
                self.all_day_pet_count,
                self.hotel_pet_count,
            ]
            .iter()
            .all(|c| *c >= 0)
    }
}
