use rand::RngCore;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AccountError, AccountResult};
use crate::models::User;
use crate::repository::UserRepository;

/// Number of random bytes in a session token (256 bits of entropy)
const TOKEN_BYTES: usize = 32;

/// Mints and clears the opaque session token attached to a user record.
///
/// This is the sole mutator of the token field. A token is valid until
/// explicitly cleared; there is no expiry or rotation, and issuing a new
/// token overwrites the previous one so each user has at most one live
/// session.
#[derive(Clone)]
pub struct SessionManager<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> SessionManager<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Generate a fresh opaque token from the thread-local CSPRNG
    fn generate_token() -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        const_hex::encode(bytes)
    }

    /// Issue a fresh session token for the user and persist it.
    ///
    /// Overwrites any previously issued token.
    pub async fn issue(&self, user_id: Uuid) -> AccountResult<String> {
        let mut user = self
            .repository
            .get_by_id(user_id)
            .await?
            .ok_or(AccountError::NotFound(user_id))?;

        let token = Self::generate_token();
        user.session_token = Some(token.clone());
        self.repository.update(user).await?;

        tracing::debug!(user_id = %user_id, "Issued session token");
        Ok(token)
    }

    /// Clear the user's session token. Idempotent: clearing an already
    /// cleared session (or a deleted user) is a no-op.
    pub async fn clear(&self, user_id: Uuid) -> AccountResult<()> {
        let Some(mut user) = self.repository.get_by_id(user_id).await? else {
            return Ok(());
        };

        if user.session_token.take().is_some() {
            self.repository.update(user).await?;
            tracing::debug!(user_id = %user_id, "Cleared session token");
        }

        Ok(())
    }

    /// Resolve the user holding the given token, if any
    pub async fn resolve(&self, token: &str) -> AccountResult<Option<User>> {
        self.repository.get_by_session_token(token).await
    }
}
