use shared::error::{AppError, AppResult};
use std::str::FromStr;

pub mod customer;
pub mod daily_reservation;
pub mod day_off;
pub mod pet_kindergarden;
pub mod reservation;
pub mod special_day;
pub mod ticket;
pub mod user;

// TEXT カラムに保存した列挙値を読み戻す
fn parse_column<T: FromStr>(column: &str, value: &str) -> AppResult<T> {
    value
        .parse()
        .map_err(|_| AppError::ConversionEntityError(format!("invalid {column} '{value}'")))
}
