//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::users::{
        data::{NewUser, UserUpdate},
        errors::UsersServiceError,
        records::{UserId, UserRecord},
        repository::PgUsersRepository,
    },
};

/// [`UsersService`] backed by `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    /// Creates the service over `db`.
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
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_user(&self, user: UserId) -> Result<UserRecord, UsersServiceError> {
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
        user: UserId,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        let update = update.without_blanks();

        if update.is_empty() {
            return Err(UsersServiceError::EmptyUpdate);
        }

        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_user(&mut tx, user, update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_user(&self, user: UserId) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_user(&mut tx, user).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

/// User account management.
#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Creates a user; the email must not be in use.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserId) -> Result<UserRecord, UsersServiceError>;

    /// Retrieves all users ordered by id.
    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError>;

    /// Applies a partial update to a user.
    async fn update_user(
        &self,
        user: UserId,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Deletes a user together with everything they own.
    async fn delete_user(&self, user: UserId) -> Result<(), UsersServiceError>;
}
