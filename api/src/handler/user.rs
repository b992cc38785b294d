use crate::{
    extractor::AuthorizedUser,
    model::{
        user::{
            CreateSocialUserRequest, UpdateUserRequest, UpdateUserRequestWithUserId, UserResponse,
        },
        ErrorResponse,
    },
};
use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use registry::AppRegistry;
use shared::error::AppResult;

// トークンの発行は認証基盤側で行うため、このエンドポイントは認証を要求しない
#[utoipa::path(
    post,
    path = "/api/v1/users/social",
    request_body = CreateSocialUserRequest,
    responses(
        (status = 201, description = "User created or refreshed", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Email already used", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn create_social_user(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateSocialUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    req.validate()?;

    registry
        .user_repository()
        .create_social_user(req.into())
        .await
        .map(|user| (StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_current_user(user: AuthorizedUser) -> Json<UserResponse> {
    Json(user.user.into())
}

#[utoipa::path(
    put,
    path = "/api/v1/users/me",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Email already used", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn update_current_user(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    req.validate()?;

    let update_user = UpdateUserRequestWithUserId::new(user.id(), req);
    registry
        .user_repository()
        .update(update_user.into())
        .await
        .map(UserResponse::from)
        .map(Json)
}
