use crate::model::{
    daily_reservation::DailyReservation, day_off::DayOff, pet_kindergarden::PetKindergarden,
    special_day::SpecialDay, ticket::TicketType,
};
use chrono::{Months, NaiveDate, NaiveTime};
use shared::error::{AppError, ErrorKind};
use thiserror::Error;

/// 予約で求められている来園内容
#[derive(Debug, Clone)]
pub struct Visit {
    pub reserved_date: NaiveDate,
    pub attendance_time: NaiveTime,
    pub ticket_type: TicketType,
    // 時間券のときだけ使う滞在時間
    pub usage_hours: Option<i32>,
}

impl Visit {
    /// 営業時間内に収まっている必要がある滞在時間
    fn stay_hours(&self) -> i64 {
        match self.ticket_type {
            TicketType::Time => i64::from(self.usage_hours.unwrap_or(0)),
            TicketType::AllDay | TicketType::Hotel => 0,
        }
    }
}

/// ある日付に対する休業情報
#[derive(Debug, Default, Clone)]
pub struct DayStatus {
    pub day_off: Option<DayOff>,
    pub special_day: Option<SpecialDay>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClosedReason {
    #[error("The pet kindergarden is closed on {0} (day off).")]
    DayOff(NaiveDate),
    #[error("The pet kindergarden is closed on {date} ({name}).")]
    SpecialDay { date: NaiveDate, name: String },
    #[error("Reservations for {0} are not accepted at this time.")]
    OutsideReservationWindow(NaiveDate),
    #[error("The requested time is outside business hours.")]
    OutsideBusinessHours,
}

impl ClosedReason {
    pub fn code(&self) -> &'static str {
        match self {
            ClosedReason::DayOff(_) => "pet_kindergarden_closed_day_off",
            ClosedReason::SpecialDay { .. } => "pet_kindergarden_closed_special_day",
            ClosedReason::OutsideReservationWindow(_) => "reservation_outside_window",
            ClosedReason::OutsideBusinessHours => "pet_kindergarden_invalid_business_hour",
        }
    }
}

impl From<ClosedReason> for AppError {
    fn from(value: ClosedReason) -> Self {
        AppError::rejected(ErrorKind::ValidationFailed, value.code(), value.to_string())
    }
}

/// 月単位の期間 [first_day, next_first_day)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub first_day: NaiveDate,
    pub next_first_day: NaiveDate,
}

impl MonthRange {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_first_day = first_day.checked_add_months(Months::new(1))?;
        Some(Self {
            first_day,
            next_first_day,
        })
    }
}

/// 月間カレンダー。予約数の集計・休業日・特別日をまとめて返す
#[derive(Debug, Clone)]
pub struct MonthlyCalendar {
    pub range: MonthRange,
    pub daily_reservations: Vec<DailyReservation>,
    pub day_offs: Vec<DayOff>,
    pub special_days: Vec<SpecialDay>,
}

/// 指定日・時間に予約を受け付けられるか判定する。
/// 休業日 → 特別日 → 受付期間 → 営業時間 の順に確認する
pub fn resolve_opening(
    pet_kindergarden: &PetKindergarden,
    visit: &Visit,
    day_status: &DayStatus,
    today: NaiveDate,
) -> Result<(), ClosedReason> {
    let date = visit.reserved_date;

    if day_status
        .day_off
        .as_ref()
        .is_some_and(|day_off| day_off.day_off_at == date)
    {
        return Err(ClosedReason::DayOff(date));
    }

    if pet_kindergarden.closed_on_special_days {
        if let Some(special_day) = day_status
            .special_day
            .as_ref()
            .filter(|special_day| special_day.date == date)
        {
            return Err(ClosedReason::SpecialDay {
                date,
                name: special_day.name.clone(),
            });
        }
    }

    if !pet_kindergarden
        .reservation_availability_option
        .is_open_on(date, today)
    {
        return Err(ClosedReason::OutsideReservationWindow(date));
    }

    if !pet_kindergarden
        .business_hours
        .covers(visit.attendance_time, visit.stay_hours())
    {
        return Err(ClosedReason::OutsideBusinessHours);
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{
        id::{DayOffId, PetKindergardenId, UserId},
        pet_kindergarden::ReservationWindow,
    };
    use rstest::rstest;

    pub(crate) fn pet_kindergarden(daily_pet_limit: i32) -> PetKindergarden {
        PetKindergarden {
            pet_kindergarden_id: PetKindergardenId::new(),
            owner_id: UserId::new(),
            name: "Mung".into(),
            phone_number: "010-0000-0000".into(),
            address: "Seoul".into(),
            guide_message: None,
            business_hours: "09:00-18:00".parse().unwrap(),
            daily_pet_limit,
            reservation_availability_option: ReservationWindow::Today,
            reservation_change_option: ReservationWindow::OneDayBefore,
            closed_on_special_days: true,
        }
    }

    pub(crate) fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    pub(crate) fn visit_at(reserved_date: &str, time: &str, ticket_type: TicketType) -> Visit {
        Visit {
            reserved_date: date(reserved_date),
            attendance_time: NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
            ticket_type,
            usage_hours: (ticket_type == TicketType::Time).then_some(3),
        }
    }

    fn day_off(on: &str) -> DayOff {
        DayOff {
            day_off_id: DayOffId::new(),
            pet_kindergarden_id: PetKindergardenId::new(),
            day_off_at: date(on),
        }
    }

    fn special_day(on: &str) -> SpecialDay {
        SpecialDay {
            date: date(on),
            name: "Children's Day".into(),
        }
    }

    #[test]
    fn month_range_spans_the_whole_month() {
        let range = MonthRange::new(2024, 12).unwrap();
        assert_eq!(range.first_day, date("2024-12-01"));
        assert_eq!(range.next_first_day, date("2025-01-01"));
        assert_eq!(MonthRange::new(2024, 2).unwrap().next_first_day, date("2024-03-01"));
        assert!(MonthRange::new(2024, 13).is_none());
    }

    #[test]
    fn open_on_a_plain_day() {
        let kg = pet_kindergarden(10);
        let visit = visit_at("2024-05-10", "10:00", TicketType::AllDay);
        assert_eq!(
            resolve_opening(&kg, &visit, &DayStatus::default(), date("2024-05-01")),
            Ok(())
        );
    }

    #[test]
    fn day_off_takes_precedence() {
        let kg = pet_kindergarden(10);
        let visit = visit_at("2024-05-05", "07:00", TicketType::AllDay);
        let status = DayStatus {
            day_off: Some(day_off("2024-05-05")),
            special_day: Some(special_day("2024-05-05")),
        };
        assert_eq!(
            resolve_opening(&kg, &visit, &status, date("2024-05-01")),
            Err(ClosedReason::DayOff(date("2024-05-05")))
        );
    }

    #[test]
    fn special_day_closes_unless_facility_opts_out() {
        let mut kg = pet_kindergarden(10);
        let visit = visit_at("2024-05-05", "10:00", TicketType::Hotel);
        let status = DayStatus {
            day_off: None,
            special_day: Some(special_day("2024-05-05")),
        };
        assert!(matches!(
            resolve_opening(&kg, &visit, &status, date("2024-05-01")),
            Err(ClosedReason::SpecialDay { .. })
        ));

        kg.closed_on_special_days = false;
        assert_eq!(
            resolve_opening(&kg, &visit, &status, date("2024-05-01")),
            Ok(())
        );
    }

    #[rstest]
    #[case(ReservationWindow::Today, "2024-05-10", true)]
    #[case(ReservationWindow::Today, "2024-05-11", false)]
    #[case(ReservationWindow::TwoDaysBefore, "2024-05-09", false)]
    #[case(ReservationWindow::TwoDaysBefore, "2024-05-08", true)]
    fn availability_window_is_checked(
        #[case] window: ReservationWindow,
        #[case] today: &str,
        #[case] open: bool,
    ) {
        let mut kg = pet_kindergarden(10);
        kg.reservation_availability_option = window;
        let visit = visit_at("2024-05-10", "10:00", TicketType::AllDay);
        let result = resolve_opening(&kg, &visit, &DayStatus::default(), date(today));
        if open {
            assert_eq!(result, Ok(()));
        } else {
            assert_eq!(
                result,
                Err(ClosedReason::OutsideReservationWindow(date("2024-05-10")))
            );
        }
    }

    #[rstest]
    #[case("08:00", TicketType::AllDay)]
    #[case("18:00", TicketType::Hotel)]
    // 16:00 から 3 時間だと閉園を過ぎる
    #[case("16:00", TicketType::Time)]
    fn rejects_visits_outside_business_hours(#[case] time: &str, #[case] ticket_type: TicketType) {
        let kg = pet_kindergarden(10);
        let visit = visit_at("2024-05-10", time, ticket_type);
        let err = resolve_opening(&kg, &visit, &DayStatus::default(), date("2024-05-01"))
            .unwrap_err();
        assert_eq!(err, ClosedReason::OutsideBusinessHours);
        assert_eq!(AppError::from(err).kind(), ErrorKind::ValidationFailed);
    }
}
