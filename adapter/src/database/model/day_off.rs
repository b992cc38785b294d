use chrono::NaiveDate;
use kernel::model::{
    day_off::DayOff,
    id::{DayOffId, PetKindergardenId},
};

#[derive(sqlx::FromRow)]
pub struct DayOffRow {
    pub day_off_id: DayOffId,
    pub pet_kindergarden_id: PetKindergardenId,
    pub day_off_at: NaiveDate,
}

impl From<DayOffRow> for DayOff {
    fn from(value: DayOffRow) -> Self {
        let DayOffRow {
            day_off_id,
            pet_kindergarden_id,
            day_off_at,
        } = value;
        DayOff {
            day_off_id,
            pet_kindergarden_id,
            day_off_at,
        }
    }
}
