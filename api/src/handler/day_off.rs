use crate::{
    extractor::AuthorizedUser,
    model::{
        day_off::{CreateDayOffRequest, CreateDayOffRequestWithIds, DayOffResponse},
        ErrorResponse,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use kernel::model::{
    day_off::event::DeleteDayOff,
    id::{DayOffId, PetKindergardenId},
};
use registry::AppRegistry;
use shared::error::AppResult;

#[utoipa::path(
    post,
    path = "/api/v1/pet-kindergardens/{pet_kindergarden_id}/day-offs",
    params(("pet_kindergarden_id" = PetKindergardenId, Path)),
    request_body = CreateDayOffRequest,
    responses(
        (status = 201, description = "Day off registered", body = DayOffResponse),
        (status = 409, description = "Day off already registered on the date", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "day-offs"
)]
pub async fn register_day_off(
    user: AuthorizedUser,
    Path(pet_kindergarden_id): Path<PetKindergardenId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateDayOffRequest>,
) -> AppResult<(StatusCode, Json<DayOffResponse>)> {
    user.owned_pet_kindergarden(&registry, pet_kindergarden_id).await?;

    registry
        .day_off_repository()
        .create(CreateDayOffRequestWithIds::new(pet_kindergarden_id, req).into())
        .await
        .map(|day_off| (StatusCode::CREATED, Json(day_off.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/pet-kindergardens/{pet_kindergarden_id}/day-offs/{day_off_id}",
    params(
        ("pet_kindergarden_id" = PetKindergardenId, Path),
        ("day_off_id" = DayOffId, Path)
    ),
    responses(
        (status = 204, description = "Day off deleted"),
        (status = 404, description = "Day off not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "day-offs"
)]
pub async fn delete_day_off(
    user: AuthorizedUser,
    Path((pet_kindergarden_id, day_off_id)): Path<(PetKindergardenId, DayOffId)>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    user.owned_pet_kindergarden(&registry, pet_kindergarden_id).await?;

    registry
        .day_off_repository()
        .delete(DeleteDayOff::new(pet_kindergarden_id, day_off_id))
        .await
        .map(|_| StatusCode::NO_CONTENT)
}
