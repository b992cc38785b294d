use crate::model::{
    calendar::MonthRange,
    day_off::{
        event::{CreateDayOff, DeleteDayOff},
        DayOff,
    },
    id::PetKindergardenId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait DayOffRepository: Send + Sync {
    async fn create(&self, event: CreateDayOff) -> AppResult<DayOff>;
    async fn delete(&self, event: DeleteDayOff) -> AppResult<()>;
    async fn find_by_month(
        &self,
        pet_kindergarden_id: PetKindergardenId,
        range: MonthRange,
    ) -> AppResult<Vec<DayOff>>;
}
