use crate::model::id::{DayOffId, PetKindergardenId};
use chrono::NaiveDate;

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOff {
    pub day_off_id: DayOffId,
    pub pet_kindergarden_id: PetKindergardenId,
    pub day_off_at: NaiveDate,
}
