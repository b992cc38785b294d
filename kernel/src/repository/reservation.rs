use crate::model::{
    id::{CustomerId, PetKindergardenId, ReservationId},
    reservation::{
        event::{CancelReservation, CreateReservation, ToggleAttendance},
        AdmittedReservation, Reservation,
    },
};
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::AppResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    // 予約を受け付け、当日の集計とチケット残数を同時に更新する
    async fn create(&self, event: CreateReservation) -> AppResult<AdmittedReservation>;
    // 予約を取り消し、集計とチケット残数を元に戻す
    async fn cancel(&self, event: CancelReservation) -> AppResult<()>;
    // 出席状態を切り替える
    async fn toggle_attendance(&self, event: ToggleAttendance) -> AppResult<Reservation>;
    async fn find_by_id(
        &self,
        pet_kindergarden_id: PetKindergardenId,
        reservation_id: ReservationId,
    ) -> AppResult<Option<Reservation>>;
    // 指定日の予約一覧（取消済みを含む）
    async fn find_by_reserved_date(
        &self,
        pet_kindergarden_id: PetKindergardenId,
        reserved_date: NaiveDate,
    ) -> AppResult<Vec<Reservation>>;
    // 顧客の予約履歴
    async fn find_by_customer_id(
        &self,
        pet_kindergarden_id: PetKindergardenId,
        customer_id: CustomerId,
    ) -> AppResult<Vec<Reservation>>;
}
