use super::parse_column;
use kernel::model::{
    id::{PetKindergardenId, UserId},
    pet_kindergarden::PetKindergarden,
};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct PetKindergardenRow {
    pub pet_kindergarden_id: PetKindergardenId,
    pub owner_id: UserId,
    pub name: String,
    pub phone_number: String,
    pub address: String,
    pub guide_message: Option<String>,
    pub business_hours: String,
    pub daily_pet_limit: i32,
    pub reservation_availability_option: String,
    pub reservation_change_option: String,
    pub closed_on_special_days: bool,
}

impl TryFrom<PetKindergardenRow> for PetKindergarden {
    type Error = AppError;

    fn try_from(value: PetKindergardenRow) -> Result<Self, Self::Error> {
        let PetKindergardenRow {
            pet_kindergarden_id,
            owner_id,
            name,
            phone_number,
            address,
            guide_message,
            business_hours,
            daily_pet_limit,
            reservation_availability_option,
            reservation_change_option,
            closed_on_special_days,
        } = value;
        Ok(PetKindergarden {
            pet_kindergarden_id,
            owner_id,
            name,
            phone_number,
            address,
            guide_message,
            business_hours: parse_column("business_hours", &business_hours)?,
            daily_pet_limit,
            reservation_availability_option: parse_column(
                "reservation_availability_option",
                &reservation_availability_option,
            )?,
            reservation_change_option: parse_column(
                "reservation_change_option",
                &reservation_change_option,
            )?,
            closed_on_special_days,
        })
    }
}
