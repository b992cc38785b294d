use crate::model::{
    calendar::MonthRange, daily_reservation::DailyReservation, id::PetKindergardenId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait DailyReservationRepository: Send + Sync {
    async fn find_by_month(
        &self,
        pet_kindergarden_id: PetKindergardenId,
        range: MonthRange,
    ) -> AppResult<Vec<DailyReservation>>;
}
