use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    calendar::{MonthlyCalendar, Visit},
    daily_reservation::DailyReservation,
    id::{CustomerId, CustomerPetId, CustomerTicketId, PetKindergardenId, ReservationId},
    reservation::{
        event::CreateReservation, AdmittedReservation, Attendance, Reservation, ReservationStatus,
    },
    special_day::SpecialDay,
};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{day_off::DayOffResponse, ticket::TicketTypeName};

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[garde(skip)]
    customer_id: CustomerId,
    #[garde(skip)]
    customer_pet_id: CustomerPetId,
    #[garde(skip)]
    customer_ticket_id: CustomerTicketId,
    #[garde(skip)]
    ticket_type: TicketTypeName,
    #[garde(skip)]
    reserved_date: NaiveDate,
    #[garde(skip)]
    #[schema(value_type = String, example = "10:00:00")]
    attendance_time: NaiveTime,
    // 時間券のときのみ指定する
    #[garde(range(min = 1))]
    usage_hours: Option<i32>,
}

#[derive(new)]
pub struct CreateReservationRequestWithIds(
    PetKindergardenId,
    DateTime<Local>,
    CreateReservationRequest,
);
impl From<CreateReservationRequestWithIds> for CreateReservation {
    fn from(value: CreateReservationRequestWithIds) -> Self {
        let CreateReservationRequestWithIds(
            pet_kindergarden_id,
            requested_at,
            CreateReservationRequest {
                customer_id,
                customer_pet_id,
                customer_ticket_id,
                ticket_type,
                reserved_date,
                attendance_time,
                usage_hours,
            },
        ) = value;
        // 利用時間は時間券のときだけ意味を持つ
        let usage_hours = usage_hours.filter(|_| ticket_type == TicketTypeName::Time);
        let visit = Visit {
            reserved_date,
            attendance_time,
            ticket_type: ticket_type.into(),
            usage_hours,
        };
        CreateReservation::new(
            pet_kindergarden_id,
            customer_id,
            customer_pet_id,
            customer_ticket_id,
            visit,
            requested_at,
        )
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation_id: ReservationId,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub customer_pet_id: CustomerPetId,
    pub customer_pet_name: String,
    pub customer_ticket_id: CustomerTicketId,
    pub ticket_type: TicketTypeName,
    pub reserved_date: NaiveDate,
    #[schema(value_type = String, example = "10:00:00")]
    pub attendance_time: NaiveTime,
    pub usage_hours: Option<i32>,
    // null は未確認
    pub attendance: Option<bool>,
    pub is_cancelled: bool,
    pub reserved_at: DateTime<Utc>,
    pub updated_reserved_at: Option<DateTime<Utc>>,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            reservation_id,
            customer,
            customer_pet,
            customer_ticket_id,
            ticket_type,
            reserved_date,
            attendance_time,
            usage_hours,
            attendance,
            status,
            reserved_at,
            updated_reserved_at,
            ..
        } = value;
        Self {
            reservation_id,
            customer_id: customer.customer_id,
            customer_name: customer.name,
            customer_pet_id: customer_pet.customer_pet_id,
            customer_pet_name: customer_pet.name,
            customer_ticket_id,
            ticket_type: ticket_type.into(),
            reserved_date,
            attendance_time,
            usage_hours,
            attendance: attendance.into(),
            is_cancelled: status == ReservationStatus::Cancelled,
            reserved_at,
            updated_reserved_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ReservationsResponse {
    pub items: Vec<ReservationResponse>,
}

impl From<Vec<Reservation>> for ReservationsResponse {
    fn from(value: Vec<Reservation>) -> Self {
        Self {
            items: value.into_iter().map(ReservationResponse::from).collect(),
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyReservationResponse {
    pub reserved_date: NaiveDate,
    pub total_pet_count: i32,
    pub time_pet_count: i32,
    pub all_day_pet_count: i32,
    pub hotel_pet_count: i32,
}

impl From<DailyReservation> for DailyReservationResponse {
    fn from(value: DailyReservation) -> Self {
        let DailyReservation {
            reserved_date,
            total_pet_count,
            time_pet_count,
            all_day_pet_count,
            hotel_pet_count,
            ..
        } = value;
        Self {
            reserved_date,
            total_pet_count,
            time_pet_count,
            all_day_pet_count,
            hotel_pet_count,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationResponse {
    pub reservation: ReservationResponse,
    pub daily_reservation: DailyReservationResponse,
    pub remaining_ticket_count: i32,
}

impl From<AdmittedReservation> for CreateReservationResponse {
    fn from(value: AdmittedReservation) -> Self {
        let AdmittedReservation {
            reservation,
            daily_reservation,
            remaining_ticket_count,
        } = value;
        Self {
            reservation: reservation.into(),
            daily_reservation: daily_reservation.into(),
            remaining_ticket_count,
        }
    }
}

#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReservedDateQuery {
    pub reserved_date: NaiveDate,
}

#[derive(Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CalendarQuery {
    #[garde(range(min = 2000, max = 9999))]
    pub year: i32,
    #[garde(range(min = 1, max = 12))]
    pub month: u32,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpecialDayResponse {
    pub date: NaiveDate,
    pub name: String,
}

impl From<SpecialDay> for SpecialDayResponse {
    fn from(value: SpecialDay) -> Self {
        let SpecialDay { date, name } = value;
        Self { date, name }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResponse {
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    pub daily_reservations: Vec<DailyReservationResponse>,
    pub day_offs: Vec<DayOffResponse>,
    pub special_days: Vec<SpecialDayResponse>,
}

impl From<MonthlyCalendar> for CalendarResponse {
    fn from(value: MonthlyCalendar) -> Self {
        let MonthlyCalendar {
            range,
            daily_reservations,
            day_offs,
            special_days,
        } = value;
        Self {
            first_day: range.first_day,
            last_day: range.next_first_day.pred_opt().unwrap_or(range.first_day),
            daily_reservations: daily_reservations
                .into_iter()
                .map(DailyReservationResponse::from)
                .collect(),
            day_offs: day_offs.into_iter().map(DayOffResponse::from).collect(),
            special_days: special_days
                .into_iter()
                .map(SpecialDayResponse::from)
                .collect(),
        }
    }
}

// attendance を省略すると 未確認 → 出席 → 欠席 → 出席 の順に切り替わる。null を送ると未確認に戻す
#[derive(Deserialize, Default, ToSchema)]
pub struct ToggleAttendanceRequest {
    #[serde(default, deserialize_with = "present_field")]
    #[schema(value_type = Option<bool>, nullable)]
    pub attendance: Option<Option<bool>>,
}

impl ToggleAttendanceRequest {
    pub fn target(&self) -> Option<Attendance> {
        self.attendance.map(Attendance::from)
    }
}

// キーがあれば null でも Some(None) にする
fn present_field<'de, D>(deserializer: D) -> Result<Option<Option<bool>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::reservation::{ReservationCustomer, ReservationPet};
    use kernel::model::ticket::TicketType;
    use rstest::rstest;

    fn request(ticket_type: &str, usage_hours: Option<i32>) -> CreateReservationRequest {
        serde_json::from_value(serde_json::json!({
            "customerId": CustomerId::new(),
            "customerPetId": CustomerPetId::new(),
            "customerTicketId": CustomerTicketId::new(),
            "ticketType": ticket_type,
            "reservedDate": "2024-05-10",
            "attendanceTime": "10:00:00",
            "usageHours": usage_hours,
        }))
        .unwrap()
    }

    #[rstest]
    #[case("TIME", Some(3), true)]
    #[case("TIME", Some(0), false)]
    #[case("ALL_DAY", None, true)]
    fn usage_hours_must_be_positive_when_given(
        #[case] ticket_type: &str,
        #[case] usage_hours: Option<i32>,
        #[case] valid: bool,
    ) {
        assert_eq!(request(ticket_type, usage_hours).validate().is_ok(), valid);
    }

    #[test]
    fn request_becomes_a_visit() {
        let pet_kindergarden_id = PetKindergardenId::new();
        let event = CreateReservation::from(CreateReservationRequestWithIds::new(
            pet_kindergarden_id,
            Local::now(),
            request("TIME", Some(2)),
        ));
        assert_eq!(event.pet_kindergarden_id, pet_kindergarden_id);
        assert_eq!(event.visit.ticket_type, TicketType::Time);
        assert_eq!(event.visit.usage_hours, Some(2));
        assert_eq!(
            event.visit.attendance_time,
            NaiveTime::from_hms_opt(10, 0, 0).unwrap()
        );
    }

    #[rstest]
    #[case("ALL_DAY")]
    #[case("HOTEL")]
    fn usage_hours_are_dropped_for_non_time_tickets(#[case] ticket_type: &str) {
        let event = CreateReservation::from(CreateReservationRequestWithIds::new(
            PetKindergardenId::new(),
            Local::now(),
            request(ticket_type, Some(4)),
        ));
        assert_eq!(event.visit.usage_hours, None);
    }

    #[rstest]
    #[case(2024, 13, false)]
    #[case(2024, 0, false)]
    #[case(2024, 2, true)]
    fn calendar_query_month_is_bounded(#[case] year: i32, #[case] month: u32, #[case] valid: bool) {
        assert_eq!(CalendarQuery { year, month }.validate().is_ok(), valid);
    }

    #[test]
    fn reservation_response_exposes_tri_state_attendance() {
        let reservation = Reservation {
            reservation_id: ReservationId::new(),
            pet_kindergarden_id: PetKindergardenId::new(),
            customer: ReservationCustomer {
                customer_id: CustomerId::new(),
                name: "Lee".into(),
            },
            customer_pet: ReservationPet {
                customer_pet_id: CustomerPetId::new(),
                name: "Choco".into(),
            },
            customer_ticket_id: CustomerTicketId::new(),
            ticket_type: TicketType::AllDay,
            reserved_date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            attendance_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            usage_hours: None,
            attendance: Attendance::Unset,
            status: ReservationStatus::Cancelled,
            reserved_at: Utc::now(),
            updated_reserved_at: None,
        };
        let res = serde_json::to_value(ReservationResponse::from(reservation)).unwrap();
        assert!(res["attendance"].is_null());
        assert_eq!(res["isCancelled"], true);
        assert_eq!(res["customerPetName"], "Choco");
        assert_eq!(res["attendanceTime"], "09:00:00");
    }

    #[rstest]
    #[case(r#"{}"#, None)]
    #[case(r#"{"attendance":true}"#, Some(Attendance::Present))]
    #[case(r#"{"attendance":false}"#, Some(Attendance::Absent))]
    #[case(r#"{"attendance":null}"#, Some(Attendance::Unset))]
    fn toggle_request_target(#[case] body: &str, #[case] expected: Option<Attendance>) {
        let req: ToggleAttendanceRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.target(), expected);
    }
}
