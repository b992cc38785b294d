use crate::database::{model::user::UserRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::UserId,
        user::{
            event::{CreateSocialUser, UpdateUser},
            User,
        },
    },
    repository::user::UserRepository,
};
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create_social_user(&self, event: CreateSocialUser) -> AppResult<User> {
        // 同じメールアドレスのユーザーがいれば電話番号だけ最新にする
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                INSERT INTO users (user_id, name, email, phone_number, social_id, social_provider)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (email) DO UPDATE
                SET phone_number = EXCLUDED.phone_number,
                    updated_at = CURRENT_TIMESTAMP(3)
                RETURNING user_id, name, email, phone_number, social_id, social_provider
            "#,
        )
        .bind(UserId::new())
        .bind(&event.name)
        .bind(&event.email)
        .bind(&event.phone_number)
        .bind(&event.social_id)
        .bind(event.social_provider.as_ref())
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
        .map_err(|e| {
            if e.is_unique_violation() {
                AppError::AlreadyExists("The social account is linked to another user.".into())
            } else {
                e
            }
        })?;

        row.try_into()
    }

    async fn find_current_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(
            r#"
                SELECT user_id, name, email, phone_number, social_id, social_provider
                FROM users
                WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(User::try_from)
        .transpose()
    }

    async fn update(&self, event: UpdateUser) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                UPDATE users
                SET name = $2, email = $3, updated_at = CURRENT_TIMESTAMP(3)
                WHERE user_id = $1
                RETURNING user_id, name, email, phone_number, social_id, social_provider
            "#,
        )
        .bind(event.user_id)
        .bind(&event.name)
        .bind(&event.email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
        .map_err(|e| {
            if e.is_unique_violation() {
                AppError::AlreadyExists(format!("Email {} is already in use.", event.email))
            } else {
                e
            }
        })?
        .ok_or_else(|| AppError::EntityNotFound("The specified user was not found.".into()))?;

        row.try_into()
    }
}
