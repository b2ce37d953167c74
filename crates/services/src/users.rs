//! User operations: registration, login, profile edits, self-deletion.

use domains::{DomainError, DomainResult, NewUser, ProfileUpdate, User};

use crate::board::BoardService;
use crate::validation::{validate_new_user, validate_profile};

impl BoardService {
    #[tracing::instrument(skip_all, fields(nickname = %new_user.nickname))]
    pub async fn create_user(&self, new_user: NewUser) -> DomainResult<User> {
        validate_new_user(&new_user)?;
        let user = self.users.create(new_user).await.map_err(|err| match err {
            DomainError::Conflict(msg) => DomainError::BadRequest(msg),
            other => other,
        })?;
        tracing::info!(user_id = user.id, "user registered");
        Ok(user)
    }

    /// Returns a signed session token for the user.
    #[tracing::instrument(skip(self, password))]
    pub async fn login_user(&self, nickname: &str, password: &str) -> DomainResult<String> {
        let user = self
            .users
            .get_by_nickname(nickname)
            .await
            .map_err(|err| match err {
                DomainError::NotFound(..) => {
                    DomainError::BadRequest(format!("no user with nickname {nickname}"))
                }
                other => other,
            })?;

        // TODO: store an argon2 hash instead of the plain password.
        if user.password != password {
            tracing::warn!(user_id = user.id, "wrong password");
            return Err(DomainError::AccessDenied("wrong password".into()));
        }

        self.tokens.issue(user.id)
    }

    pub async fn get_user(&self, id: i64) -> DomainResult<User> {
        self.users.get(id).await
    }

    #[tracing::instrument(skip(self, profile))]
    pub async fn update_user(&self, id: i64, profile: ProfileUpdate) -> DomainResult<User> {
        self.users.get(id).await?;
        validate_profile(&profile)?;
        self.users.update(id, profile).await
    }

    /// Users may only delete themselves.
    #[tracing::instrument(skip(self))]
    pub async fn delete_user(&self, id: i64, requester_id: i64) -> DomainResult<()> {
        if id != requester_id {
            tracing::warn!("attempt to delete another user");
            return Err(DomainError::AccessDenied(format!(
                "user {requester_id} may not delete user {id}"
            )));
        }
        self.users.delete(id).await?;
        tracing::info!("user deleted");
        Ok(())
    }
}
