use crate::model::{
    id::PetKindergardenId,
    ticket::{
        event::{CreateTicket, DeleteTicket},
        Ticket,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn create(&self, event: CreateTicket) -> AppResult<Ticket>;
    // 削除されていないチケットだけを返す
    async fn find_active_by_pet_kindergarden_id(
        &self,
        pet_kindergarden_id: PetKindergardenId,
    ) -> AppResult<Vec<Ticket>>;
    // 論理削除。発行済みの顧客チケットはそのまま残る
    async fn delete(&self, event: DeleteTicket) -> AppResult<()>;
}
