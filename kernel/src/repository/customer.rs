use crate::model::{
    customer::{
        event::{CreateCustomer, IssueCustomerTicket},
        Customer, CustomerTicket,
    },
    id::{CustomerId, PetKindergardenId},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    // 顧客とペットを同一トランザクションで登録する
    async fn create(&self, event: CreateCustomer) -> AppResult<Customer>;
    async fn find_all(&self, pet_kindergarden_id: PetKindergardenId) -> AppResult<Vec<Customer>>;
    async fn find_by_id(
        &self,
        pet_kindergarden_id: PetKindergardenId,
        customer_id: CustomerId,
    ) -> AppResult<Option<Customer>>;
    // 園のチケットを顧客に発行する。回数と有効期限は発行元チケットから決まる
    async fn issue_ticket(&self, event: IssueCustomerTicket) -> AppResult<CustomerTicket>;
    async fn find_tickets(
        &self,
        pet_kindergarden_id: PetKindergardenId,
        customer_id: CustomerId,
    ) -> AppResult<Vec<CustomerTicket>>;
}
