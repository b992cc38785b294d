use crate::model::{calendar::MonthRange, special_day::SpecialDay};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait SpecialDayRepository: Send + Sync {
    async fn find_by_month(&self, range: MonthRange) -> AppResult<Vec<SpecialDay>>;
}
