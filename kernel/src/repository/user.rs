use crate::model::{
    id::UserId,
    user::{
        event::{CreateSocialUser, UpdateUser},
        User,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    // ソーシャルログインのユーザーを登録する。既存なら電話番号だけ更新して返す
    async fn create_social_user(&self, event: CreateSocialUser) -> AppResult<User>;
    async fn find_current_user(&self, user_id: UserId) -> AppResult<Option<User>>;
    async fn update(&self, event: UpdateUser) -> AppResult<User>;
}
