use crate::model::{
    id::UserId,
    pet_kindergarden::{BusinessHours, ReservationWindow},
};

#[derive(Debug)]
pub struct CreatePetKindergarden {
    pub owner_id: UserId,
    pub name: String,
    pub phone_number: String,
    pub address: String,
    pub guide_message: Option<String>,
    pub business_hours: BusinessHours,
    pub daily_pet_limit: i32,
    pub reservation_availability_option: ReservationWindow,
    pub reservation_change_option: ReservationWindow,
    pub closed_on_special_days: bool,
}
