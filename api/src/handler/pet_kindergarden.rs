use crate::{
    extractor::AuthorizedUser,
    model::{
        pet_kindergarden::{
            CreatePetKindergardenRequest, CreatePetKindergardenRequestWithOwner,
            PetKindergardenResponse,
        },
        ErrorResponse,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{id::PetKindergardenId, pet_kindergarden::event::CreatePetKindergarden};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

#[utoipa::path(
    post,
    path = "/api/v1/pet-kindergardens",
    request_body = CreatePetKindergardenRequest,
    responses(
        (status = 201, description = "Pet kindergarden created", body = PetKindergardenResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "User already has a pet kindergarden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "pet-kindergardens"
)]
pub async fn register_pet_kindergarden(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreatePetKindergardenRequest>,
) -> AppResult<(StatusCode, Json<PetKindergardenResponse>)> {
    req.validate()?;

    let event: CreatePetKindergarden =
        CreatePetKindergardenRequestWithOwner::new(user.id(), req).try_into()?;
    registry
        .pet_kindergarden_repository()
        .create(event)
        .await
        .map(|pk| (StatusCode::CREATED, Json(pk.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/pet-kindergardens/me",
    responses(
        (status = 200, description = "Pet kindergarden owned by the user", body = PetKindergardenResponse),
        (status = 404, description = "User has no pet kindergarden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "pet-kindergardens"
)]
pub async fn show_my_pet_kindergarden(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PetKindergardenResponse>> {
    registry
        .pet_kindergarden_repository()
        .find_by_owner_id(user.id())
        .await
        .and_then(|pk| match pk {
            Some(pk) => Ok(Json(pk.into())),
            None => Err(AppError::EntityNotFound(
                "User has no pet kindergarden.".into(),
            )),
        })
}

#[utoipa::path(
    get,
    path = "/api/v1/pet-kindergardens/{pet_kindergarden_id}",
    params(("pet_kindergarden_id" = PetKindergardenId, Path, description = "Pet kindergarden id")),
    responses(
        (status = 200, description = "Pet kindergarden detail", body = PetKindergardenResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "pet-kindergardens"
)]
pub async fn show_pet_kindergarden(
    user: AuthorizedUser,
    Path(pet_kindergarden_id): Path<PetKindergardenId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PetKindergardenResponse>> {
    user.owned_pet_kindergarden(&registry, pet_kindergarden_id)
        .await
        .map(PetKindergardenResponse::from)
        .map(Json)
}
