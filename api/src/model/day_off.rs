use chrono::NaiveDate;
use derive_new::new;
use kernel::model::{
    day_off::{event::CreateDayOff, DayOff},
    id::{DayOffId, PetKindergardenId},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDayOffRequest {
    pub day_off_at: NaiveDate,
}

#[derive(new)]
pub struct CreateDayOffRequestWithIds(PetKindergardenId, CreateDayOffRequest);
impl From<CreateDayOffRequestWithIds> for CreateDayOff {
    fn from(value: CreateDayOffRequestWithIds) -> Self {
        let CreateDayOffRequestWithIds(pet_kindergarden_id, CreateDayOffRequest { day_off_at }) =
            value;
        CreateDayOff::new(pet_kindergarden_id, day_off_at)
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayOffResponse {
    pub day_off_id: DayOffId,
    pub day_off_at: NaiveDate,
}

impl From<DayOff> for DayOffResponse {
    fn from(value: DayOff) -> Self {
        let DayOff {
            day_off_id,
            day_off_at,
            ..
        } = value;
        Self {
            day_off_id,
            day_off_at,
        }
    }
}
