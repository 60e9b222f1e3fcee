//! Users service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::users::{
        data::{NewUser, UserUpdate},
        errors::UsersServiceError,
        records::{UserRecord, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        user.validate()?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_user(&mut tx, user).await?;

        tx.commit().await?;

        info!(user = %created.uuid, is_admin = created.is_admin, "created user");

        Ok(created)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let users = self.repository.list_users(&mut tx).await?;

        tx.commit().await?;

        Ok(users)
    }

    async fn update_user(
        &self,
        user: UserUuid,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        update.validate()?;

        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_user(&mut tx, user, update).await?;

        tx.commit().await?;

        info!(user = %updated.uuid, is_admin = updated.is_admin, "updated user");

        Ok(updated)
    }

    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_user(&mut tx, user).await?;

        if rows_affected == 0 {
            // Either gone already or protected; the read tells which.
            let existing = self.repository.get_user(&mut tx, user).await?;

            return Err(if existing.is_admin {
                UsersServiceError::AdminProtected
            } else {
                UsersServiceError::NotFound
            });
        }

        tx.commit().await?;

        info!(%user, "deleted user");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Creates a new user.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a single active user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Active users, newest first.
    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError>;

    /// Replaces a user's name, email and admin flag.
    async fn update_user(
        &self,
        user: UserUuid,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Soft-deletes a user. Administrators are refused.
    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError>;
}
