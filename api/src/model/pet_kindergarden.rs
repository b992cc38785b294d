use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{PetKindergardenId, UserId},
    pet_kindergarden::{
        event::CreatePetKindergarden, BusinessHours, PetKindergarden, ReservationWindow,
    },
};
use serde::{Deserialize, Serialize};
use shared::error::AppError;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationWindowName {
    Today,
    OneDayBefore,
    TwoDaysBefore,
    ThreeDaysBefore,
}

impl From<ReservationWindow> for ReservationWindowName {
    fn from(value: ReservationWindow) -> Self {
        match value {
            ReservationWindow::Today => Self::Today,
            ReservationWindow::OneDayBefore => Self::OneDayBefore,
            ReservationWindow::TwoDaysBefore => Self::TwoDaysBefore,
            ReservationWindow::ThreeDaysBefore => Self::ThreeDaysBefore,
        }
    }
}

impl From<ReservationWindowName> for ReservationWindow {
    fn from(value: ReservationWindowName) -> Self {
        match value {
            ReservationWindowName::Today => Self::Today,
            ReservationWindowName::OneDayBefore => Self::OneDayBefore,
            ReservationWindowName::TwoDaysBefore => Self::TwoDaysBefore,
            ReservationWindowName::ThreeDaysBefore => Self::ThreeDaysBefore,
        }
    }
}

fn business_hours_format(value: &str, _: &()) -> garde::Result {
    value
        .parse::<BusinessHours>()
        .map(|_| ())
        .map_err(|e| garde::Error::new(e.to_string()))
}

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetKindergardenRequest {
    #[garde(length(min = 1, max = 255))]
    name: String,
    #[garde(length(min = 1, max = 32))]
    phone_number: String,
    #[garde(length(min = 1, max = 255))]
    address: String,
    #[garde(skip)]
    guide_message: Option<String>,
    // "09:00-18:00"
    #[garde(custom(business_hours_format))]
    #[schema(example = "09:00-18:00")]
    business_hours: String,
    #[garde(range(min = 1))]
    daily_pet_limit: i32,
    #[garde(skip)]
    reservation_availability_option: ReservationWindowName,
    #[garde(skip)]
    reservation_change_option: ReservationWindowName,
    #[garde(skip)]
    #[serde(default)]
    closed_on_special_days: bool,
}

#[derive(new)]
pub struct CreatePetKindergardenRequestWithOwner(UserId, CreatePetKindergardenRequest);
impl TryFrom<CreatePetKindergardenRequestWithOwner> for CreatePetKindergarden {
    type Error = AppError;

    fn try_from(value: CreatePetKindergardenRequestWithOwner) -> Result<Self, Self::Error> {
        let CreatePetKindergardenRequestWithOwner(
            owner_id,
            CreatePetKindergardenRequest {
                name,
                phone_number,
                address,
                guide_message,
                business_hours,
                daily_pet_limit,
                reservation_availability_option,
                reservation_change_option,
                closed_on_special_days,
            },
        ) = value;
        Ok(Self {
            owner_id,
            name,
            phone_number,
            address,
            guide_message,
            business_hours: business_hours.parse::<BusinessHours>()?,
            daily_pet_limit,
            reservation_availability_option: reservation_availability_option.into(),
            reservation_change_option: reservation_change_option.into(),
            closed_on_special_days,
        })
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetKindergardenResponse {
    pub pet_kindergarden_id: PetKindergardenId,
    pub owner_id: UserId,
    pub name: String,
    pub phone_number: String,
    pub address: String,
    pub guide_message: Option<String>,
    #[schema(example = "09:00-18:00")]
    pub business_hours: String,
    pub daily_pet_limit: i32,
    pub reservation_availability_option: ReservationWindowName,
    pub reservation_change_option: ReservationWindowName,
    pub closed_on_special_days: bool,
}

impl From<PetKindergarden> for PetKindergardenResponse {
    fn from(value: PetKindergarden) -> Self {
        let PetKindergarden {
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
        Self {
            pet_kindergarden_id,
            owner_id,
            name,
            phone_number,
            address,
            guide_message,
            business_hours: business_hours.to_string(),
            daily_pet_limit,
            reservation_availability_option: reservation_availability_option.into(),
            reservation_change_option: reservation_change_option.into(),
            closed_on_special_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request(business_hours: &str, daily_pet_limit: i32) -> CreatePetKindergardenRequest {
        serde_json::from_value(serde_json::json!({
            "name": "Mung Mung",
            "phoneNumber": "02-123-4567",
            "address": "Seoul",
            "businessHours": business_hours,
            "dailyPetLimit": daily_pet_limit,
            "reservationAvailabilityOption": "TODAY",
            "reservationChangeOption": "ONE_DAY_BEFORE",
        }))
        .unwrap()
    }

    #[rstest]
    #[case("09:00-18:00", 10, true)]
    #[case("18:00-09:00", 10, false)]
    #[case("9-18", 10, false)]
    #[case("09:00-18:00", 0, false)]
    fn facility_requests_are_validated(
        #[case] business_hours: &str,
        #[case] daily_pet_limit: i32,
        #[case] valid: bool,
    ) {
        assert_eq!(request(business_hours, daily_pet_limit).validate().is_ok(), valid);
    }

    #[test]
    fn request_becomes_an_event_for_the_owner() {
        let owner_id = UserId::new();
        let event = CreatePetKindergarden::try_from(CreatePetKindergardenRequestWithOwner::new(
            owner_id,
            request("09:30-19:00", 12),
        ))
        .unwrap();
        assert_eq!(event.owner_id, owner_id);
        assert_eq!(event.business_hours.to_string(), "09:30-19:00");
        assert_eq!(
            event.reservation_change_option,
            ReservationWindow::OneDayBefore
        );
        assert!(!event.closed_on_special_days);
    }
}
