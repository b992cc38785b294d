use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::UserId,
    user::{
        event::{CreateSocialUser, UpdateUser},
        SocialProvider, User,
    },
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SocialProviderName {
    Kakao,
    Apple,
    Google,
}

impl From<SocialProvider> for SocialProviderName {
    fn from(value: SocialProvider) -> Self {
        match value {
            SocialProvider::Kakao => Self::Kakao,
            SocialProvider::Apple => Self::Apple,
            SocialProvider::Google => Self::Google,
        }
    }
}

impl From<SocialProviderName> for SocialProvider {
    fn from(value: SocialProviderName) -> Self {
        match value {
            SocialProviderName::Kakao => Self::Kakao,
            SocialProviderName::Apple => Self::Apple,
            SocialProviderName::Google => Self::Google,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub social_provider: SocialProviderName,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let User {
            user_id,
            name,
            email,
            phone_number,
            social_id: _,
            social_provider,
        } = value;
        Self {
            user_id,
            name,
            email,
            phone_number,
            social_provider: social_provider.into(),
        }
    }
}

// 認証基盤からソーシャルログインの結果として渡される
#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSocialUserRequest {
    #[garde(email)]
    email: String,
    #[garde(length(min = 1, max = 255))]
    name: String,
    #[garde(length(min = 1, max = 32))]
    phone_number: String,
    #[garde(length(min = 1, max = 255))]
    social_id: String,
    #[garde(skip)]
    social_provider: SocialProviderName,
}

impl From<CreateSocialUserRequest> for CreateSocialUser {
    fn from(value: CreateSocialUserRequest) -> Self {
        let CreateSocialUserRequest {
            email,
            name,
            phone_number,
            social_id,
            social_provider,
        } = value;
        Self {
            email,
            name,
            phone_number,
            social_id,
            social_provider: social_provider.into(),
        }
    }
}

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[garde(length(min = 1, max = 255))]
    name: String,
    #[garde(email)]
    email: String,
}

#[derive(new)]
pub struct UpdateUserRequestWithUserId(UserId, UpdateUserRequest);
impl From<UpdateUserRequestWithUserId> for UpdateUser {
    fn from(value: UpdateUserRequestWithUserId) -> Self {
        let UpdateUserRequestWithUserId(user_id, UpdateUserRequest { name, email }) = value;
        Self {
            user_id,
            name,
            email,
        }
    }
}
