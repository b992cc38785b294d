use chrono::NaiveDate;
use kernel::model::{daily_reservation::DailyReservation, id::PetKindergardenId};

#[derive(sqlx::FromRow)]
pub struct DailyReservationRow {
    pub pet_kindergarden_id: PetKindergardenId,
    pub reserved_date: NaiveDate,
    pub total_pet_count: i32,
    pub time_pet_count: i32,
    pub all_day_pet_count: i32,
    pub hotel_pet_count: i32,
}

impl From<DailyReservationRow> for DailyReservation {
    fn from(value: DailyReservationRow) -> Self {
        let DailyReservationRow {
            pet_kindergarden_id,
            reserved_date,
            total_pet_count,
            time_pet_count,
            all_day_pet_count,
            hotel_pet_count,
        } = value;
        DailyReservation {
            pet_kindergarden_id,
            reserved_date,
            total_pet_count,
            time_pet_count,
            all_day_pet_count,
            hotel_pet_count,
        }
    }
}
