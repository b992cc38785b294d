use crate::model::id::{PetKindergardenId, UserId};
use chrono::{Days, NaiveDate};
use strum::{AsRefStr, EnumString};

pub mod business_hours;
pub mod event;

pub use business_hours::{BusinessHours, InvalidBusinessHours};

#[derive(Debug, Clone)]
pub struct PetKindergarden {
    pub pet_kindergarden_id: PetKindergardenId,
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

impl PetKindergarden {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}

/// 予約の受付・変更を何日前まで許すか
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationWindow {
    Today,
    OneDayBefore,
    TwoDaysBefore,
    ThreeDaysBefore,
}

impl ReservationWindow {
    pub fn days_before(self) -> u64 {
        match self {
            ReservationWindow::Today => 0,
            ReservationWindow::OneDayBefore => 1,
            ReservationWindow::TwoDaysBefore => 2,
            ReservationWindow::ThreeDaysBefore => 3,
        }
    }

    /// target 日に対する受付の最終日
    pub fn deadline_for(self, target: NaiveDate) -> Option<NaiveDate> {
        target.checked_sub_days(Days::new(self.days_before()))
    }

    pub fn is_open_on(self, target: NaiveDate, today: NaiveDate) -> bool {
        self.deadline_for(target)
            .is_some_and(|deadline| today <= deadline)
    }
}
