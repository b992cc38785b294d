use super::parse_column;
use kernel::model::{id::UserId, user::User};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub social_id: String,
    pub social_provider: String,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        let UserRow {
            user_id,
            name,
            email,
            phone_number,
            social_id,
            social_provider,
        } = value;
        Ok(User {
            user_id,
            name,
            email,
            phone_number,
            social_id,
            social_provider: parse_column("social_provider", &social_provider)?,
        })
    }
}
