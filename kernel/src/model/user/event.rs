use crate::model::{id::UserId, user::SocialProvider};
use derive_new::new;

// ソーシャルログイン時に認証基盤から渡されるユーザー情報
#[derive(new, Debug)]
pub struct CreateSocialUser {
    pub email: String,
    pub name: String,
    pub phone_number: String,
    pub social_id: String,
    pub social_provider: SocialProvider,
}

#[derive(new, Debug)]
pub struct UpdateUser {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
}
