pub mod customer;
pub mod day_off;
pub mod pet_kindergarden;
pub mod reservation;
pub mod ticket;
pub mod user;

use serde::Serialize;
use utoipa::ToSchema;

// エラー応答の形。ドキュメント生成用
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}
