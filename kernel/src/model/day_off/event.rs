use crate::model::id::{DayOffId, PetKindergardenId};
use chrono::NaiveDate;
use derive_new::new;

#[derive(new, Debug)]
pub struct CreateDayOff {
    pub pet_kindergarden_id: PetKindergardenId,
    pub day_off_at: NaiveDate,
}

#[derive(new, Debug)]
pub struct DeleteDayOff {
    pub pet_kindergarden_id: PetKindergardenId,
    pub day_off_id: DayOffId,
}
