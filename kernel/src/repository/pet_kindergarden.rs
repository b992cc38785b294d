use crate::model::{
    id::{PetKindergardenId, UserId},
    pet_kindergarden::{event::CreatePetKindergarden, PetKindergarden},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait PetKindergardenRepository: Send + Sync {
    // ユーザー 1 人につき 1 園まで
    async fn create(&self, event: CreatePetKindergarden) -> AppResult<PetKindergarden>;
    async fn find_by_id(
        &self,
        pet_kindergarden_id: PetKindergardenId,
    ) -> AppResult<Option<PetKindergarden>>;
    async fn find_by_owner_id(&self, owner_id: UserId) -> AppResult<Option<PetKindergarden>>;
}
