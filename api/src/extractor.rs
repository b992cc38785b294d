use axum::{async_trait, extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use kernel::{
    model::{
        auth::AccessToken,
        id::{PetKindergardenId, UserId},
        pet_kindergarden::PetKindergarden,
        user::User,
    },
    repository::{auth::AuthRepository, user::UserRepository},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

// リクエストの Authorization ヘッダから解決した操作ユーザー
pub struct AuthorizedUser {
    pub access_token: AccessToken,
    pub user: User,
}

impl AuthorizedUser {
    pub fn id(&self) -> UserId {
        self.user.user_id
    }

    /// 園を取得し、操作ユーザーが所有者であることを確かめる
    pub async fn owned_pet_kindergarden(
        &self,
        registry: &AppRegistry,
        pet_kindergarden_id: PetKindergardenId,
    ) -> AppResult<PetKindergarden> {
        let found = registry
            .pet_kindergarden_repository()
            .find_by_id(pet_kindergarden_id)
            .await?;
        self.ensure_owner(pet_kindergarden_id, found)
    }

    fn ensure_owner(
        &self,
        pet_kindergarden_id: PetKindergardenId,
        found: Option<PetKindergarden>,
    ) -> AppResult<PetKindergarden> {
        let pet_kindergarden = found.ok_or_else(|| {
            AppError::EntityNotFound(format!("Pet kindergarden ({pet_kindergarden_id}) not found."))
        })?;
        if !pet_kindergarden.is_owned_by(self.id()) {
            return Err(AppError::ForbiddenOperation);
        }
        Ok(pet_kindergarden)
    }
}

// トークンに紐づくユーザーが引けなければ未認証扱い
async fn resolve_user(
    auth: &dyn AuthRepository,
    users: &dyn UserRepository,
    access_token: &AccessToken,
) -> AppResult<User> {
    let user_id = auth
        .fetch_user_id_from_token(access_token)
        .await?
        .ok_or(AppError::UnauthorizedError)?;
    users
        .find_current_user(user_id)
        .await?
        .ok_or(AppError::UnauthorizedError)
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::UnauthorizedError)?;
        let access_token = AccessToken(bearer.token().to_string());

        let user = resolve_user(
            registry.auth_repository().as_ref(),
            registry.user_repository().as_ref(),
            &access_token,
        )
        .await?;

        Ok(Self { access_token, user })
    }
}
