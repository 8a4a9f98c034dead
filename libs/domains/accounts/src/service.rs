use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::Arc;
use uuid::Uuid;

use access_control::{authorize, Actor, Decision, Operation};

use crate::error::{AccountError, AccountResult};
use crate::models::{LoginRequest, RegisterRequest, UpdateProfile, User, UserResponse};
use crate::repository::UserRepository;
use crate::session::SessionManager;

/// Outcome of a logout request. A logout without a live session is
/// benign, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutOutcome {
    LoggedOut,
    NotLoggedIn,
}

/// Service layer for account business logic
#[derive(Clone)]
pub struct AccountService<R: UserRepository> {
    repository: Arc<R>,
    sessions: SessionManager<R>,
}

impl<R: UserRepository> AccountService<R> {
    pub fn new(repository: R) -> Self {
        let repository = Arc::new(repository);
        Self {
            sessions: SessionManager::new(Arc::clone(&repository)),
            repository,
        }
    }

    /// Register a new account and immediately establish a session.
    ///
    /// Returns the created identity together with the freshly issued
    /// session token.
    pub async fn register(&self, input: RegisterRequest) -> AccountResult<(UserResponse, String)> {
        if self.repository.email_exists(&input.email).await? {
            return Err(AccountError::DuplicateEmail(input.email));
        }

        let password_hash = self.hash_password(&input.password)?;
        let user = User::new(input.name, input.email, password_hash, input.role);

        let created = self.repository.create(user).await?;
        let token = self.sessions.issue(created.id).await?;

        tracing::info!(user_id = %created.id, role = %created.role, "Registered user");
        Ok((created.into(), token))
    }

    /// Verify credentials and issue a fresh session token.
    ///
    /// An unknown email and a failed password check are indistinguishable
    /// to the caller. A successful login overwrites any prior token.
    pub async fn login(&self, input: LoginRequest) -> AccountResult<(UserResponse, String)> {
        let user = self
            .repository
            .get_by_email(&input.email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !self.verify_password(&input.password, &user.password_hash)? {
            return Err(AccountError::InvalidCredentials);
        }

        let token = self.sessions.issue(user.id).await?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok((user.into(), token))
    }

    /// Clear the actor's session, if any
    pub async fn logout(&self, actor: Option<&Actor>) -> AccountResult<LogoutOutcome> {
        let Some(actor) = actor else {
            return Ok(LogoutOutcome::NotLoggedIn);
        };

        self.sessions.clear(actor.id).await?;

        tracing::info!(user_id = %actor.id, "User logged out");
        Ok(LogoutOutcome::LoggedOut)
    }

    /// Resolve the actor for a presented session token.
    ///
    /// `None` token or a token no store record holds both resolve to an
    /// unauthenticated request.
    pub async fn authenticate(&self, token: Option<&str>) -> AccountResult<Option<Actor>> {
        let Some(token) = token else {
            return Ok(None);
        };

        let user = self.sessions.resolve(token).await?;
        Ok(user.map(|u| u.actor()))
    }

    /// View a profile; self only
    pub async fn view_profile(
        &self,
        actor: Option<&Actor>,
        target_id: Uuid,
    ) -> AccountResult<UserResponse> {
        self.ensure(authorize(actor, Operation::ViewProfile, Some(target_id)))?;

        let user = self
            .repository
            .get_by_id(target_id)
            .await?
            .ok_or(AccountError::NotFound(target_id))?;

        Ok(user.into())
    }

    /// Apply a partial profile update; self only
    pub async fn update_profile(
        &self,
        actor: Option<&Actor>,
        target_id: Uuid,
        input: UpdateProfile,
    ) -> AccountResult<UserResponse> {
        self.ensure(authorize(actor, Operation::UpdateProfile, Some(target_id)))?;

        let mut user = self
            .repository
            .get_by_id(target_id)
            .await?
            .ok_or(AccountError::NotFound(target_id))?;

        if let Some(ref new_email) = input.email {
            if !new_email.eq_ignore_ascii_case(&user.email)
                && self.repository.email_exists(new_email).await?
            {
                return Err(AccountError::DuplicateEmail(new_email.clone()));
            }
        }

        let new_password_hash = match input.password {
            Some(ref password) => Some(self.hash_password(password)?),
            None => None,
        };

        user.apply_update(input, new_password_hash);

        let updated = self.repository.update(user).await?;

        tracing::info!(user_id = %updated.id, "Updated profile");
        Ok(updated.into())
    }

    /// Hard-delete a profile; self only. A missing target is NotFound,
    /// distinct from an authorization failure.
    pub async fn delete_profile(&self, actor: Option<&Actor>, target_id: Uuid) -> AccountResult<()> {
        self.ensure(authorize(actor, Operation::DeleteProfile, Some(target_id)))?;

        if !self.repository.delete(target_id).await? {
            return Err(AccountError::NotFound(target_id));
        }

        tracing::info!(user_id = %target_id, "Deleted profile");
        Ok(())
    }

    fn ensure(&self, decision: Decision) -> AccountResult<()> {
        match decision {
            Decision::Allowed => Ok(()),
            Decision::DeniedUnauthenticated => Err(AccountError::Unauthenticated),
            Decision::DeniedForbidden => Err(AccountError::Forbidden),
        }
    }

    // Password helpers

    fn hash_password(&self, password: &str) -> AccountResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AccountError::PasswordHash(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AccountResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| AccountError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
