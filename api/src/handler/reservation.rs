use crate::{
    extractor::AuthorizedUser,
    model::{
        reservation::{
            CalendarQuery, CalendarResponse, CreateReservationRequest,
            CreateReservationRequestWithIds, CreateReservationResponse, ReservationResponse,
            ReservationsResponse, ReservedDateQuery, ToggleAttendanceRequest,
        },
        ErrorResponse,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use garde::Validate;
use kernel::model::{
    calendar::{MonthRange, MonthlyCalendar},
    id::{PetKindergardenId, ReservationId},
    reservation::event::{CancelReservation, ToggleAttendance},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

#[utoipa::path(
    post,
    path = "/api/v1/pet-kindergardens/{pet_kindergarden_id}/reservations",
    params(("pet_kindergarden_id" = PetKindergardenId, Path)),
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation admitted", body = CreateReservationResponse),
        (status = 400, description = "Closed day, outside hours or unusable ticket", body = ErrorResponse),
        (status = 404, description = "Customer, pet or ticket not found", body = ErrorResponse),
        (status = 409, description = "Duplicate reservation or daily limit reached", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "reservations"
)]
pub async fn create_reservation(
    user: AuthorizedUser,
    Path(pet_kindergarden_id): Path<PetKindergardenId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<CreateReservationResponse>)> {
    req.validate()?;
    user.owned_pet_kindergarden(&registry, pet_kindergarden_id).await?;

    let event = CreateReservationRequestWithIds::new(pet_kindergarden_id, Local::now(), req);
    registry
        .reservation_repository()
        .create(event.into())
        .await
        .map(|admitted| (StatusCode::CREATED, Json(admitted.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/pet-kindergardens/{pet_kindergarden_id}/reservations",
    params(("pet_kindergarden_id" = PetKindergardenId, Path), ReservedDateQuery),
    responses(
        (status = 200, description = "Reservations of the day", body = ReservationsResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "reservations"
)]
pub async fn show_reservations_of_day(
    user: AuthorizedUser,
    Path(pet_kindergarden_id): Path<PetKindergardenId>,
    Query(query): Query<ReservedDateQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    user.owned_pet_kindergarden(&registry, pet_kindergarden_id).await?;

    registry
        .reservation_repository()
        .find_by_reserved_date(pet_kindergarden_id, query.reserved_date)
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/pet-kindergardens/{pet_kindergarden_id}/reservations/calendar",
    params(("pet_kindergarden_id" = PetKindergardenId, Path), CalendarQuery),
    responses(
        (status = 200, description = "Daily counters, day offs and special days of the month", body = CalendarResponse),
        (status = 400, description = "Invalid year or month", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "reservations"
)]
pub async fn show_calendar(
    user: AuthorizedUser,
    Path(pet_kindergarden_id): Path<PetKindergardenId>,
    Query(query): Query<CalendarQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<CalendarResponse>> {
    query.validate()?;
    user.owned_pet_kindergarden(&registry, pet_kindergarden_id).await?;

    let range = MonthRange::new(query.year, query.month).ok_or_else(|| {
        AppError::UnprocessableEntity(format!("Invalid month {}-{}.", query.year, query.month))
    })?;

    let daily_reservations = registry
        .daily_reservation_repository()
        .find_by_month(pet_kindergarden_id, range)
        .await?;
    let day_offs = registry
        .day_off_repository()
        .find_by_month(pet_kindergarden_id, range)
        .await?;
    let special_days = registry
        .special_day_repository()
        .find_by_month(range)
        .await?;

    Ok(Json(
        MonthlyCalendar {
            range,
            daily_reservations,
            day_offs,
            special_days,
        }
        .into(),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/v1/pet-kindergardens/{pet_kindergarden_id}/reservations/{reservation_id}",
    params(
        ("pet_kindergarden_id" = PetKindergardenId, Path),
        ("reservation_id" = ReservationId, Path)
    ),
    responses(
        (status = 204, description = "Reservation cancelled"),
        (status = 404, description = "Reservation not found", body = ErrorResponse),
        (status = 409, description = "Already cancelled or change window elapsed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "reservations"
)]
pub async fn cancel_reservation(
    user: AuthorizedUser,
    Path((pet_kindergarden_id, reservation_id)): Path<(PetKindergardenId, ReservationId)>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    user.owned_pet_kindergarden(&registry, pet_kindergarden_id).await?;

    registry
        .reservation_repository()
        .cancel(CancelReservation::new(
            pet_kindergarden_id,
            reservation_id,
            Local::now(),
        ))
        .await
        .map(|_| StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch,
    path = "/api/v1/pet-kindergardens/{pet_kindergarden_id}/reservations/{reservation_id}/attendance",
    params(
        ("pet_kindergarden_id" = PetKindergardenId, Path),
        ("reservation_id" = ReservationId, Path)
    ),
    request_body = ToggleAttendanceRequest,
    responses(
        (status = 200, description = "Attendance set, reset by null or cycled when omitted", body = ReservationResponse),
        (status = 404, description = "Reservation not found", body = ErrorResponse),
        (status = 409, description = "Reservation is cancelled", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "reservations"
)]
pub async fn toggle_attendance(
    user: AuthorizedUser,
    Path((pet_kindergarden_id, reservation_id)): Path<(PetKindergardenId, ReservationId)>,
    State(registry): State<AppRegistry>,
    Json(req): Json<ToggleAttendanceRequest>,
) -> AppResult<Json<ReservationResponse>> {
    user.owned_pet_kindergarden(&registry, pet_kindergarden_id).await?;

    registry
        .reservation_repository()
        .toggle_attendance(ToggleAttendance::new(
            pet_kindergarden_id,
            reservation_id,
            req.target(),
            Local::now(),
        ))
        .await
        .map(ReservationResponse::from)
        .map(Json)
}
