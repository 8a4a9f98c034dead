use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AccountError, AccountResult};
use crate::models::User;

/// Repository trait for User persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user; fails with Conflict on a duplicate email
    async fn create(&self, user: User) -> AccountResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> AccountResult<Option<User>>;

    /// Get a user by email (case-insensitive)
    async fn get_by_email(&self, email: &str) -> AccountResult<Option<User>>;

    /// Get the user holding the given session token
    async fn get_by_session_token(&self, token: &str) -> AccountResult<Option<User>>;

    /// Update an existing user record in full
    async fn update(&self, user: User) -> AccountResult<User>;

    /// Delete a user by ID; returns whether a record was removed
    async fn delete(&self, id: Uuid) -> AccountResult<bool>;

    /// Check whether an email is already taken
    async fn email_exists(&self, email: &str) -> AccountResult<bool>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AccountResult<User> {
        let mut users = self.users.write().await;

        let email_exists = users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email));

        if email_exists {
            return Err(AccountError::DuplicateEmail(user.email));
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, email = %user.email, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> AccountResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> AccountResult<Option<User>> {
        let users = self.users.read().await;
        let user = users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned();
        Ok(user)
    }

    async fn get_by_session_token(&self, token: &str) -> AccountResult<Option<User>> {
        let users = self.users.read().await;
        let user = users
            .values()
            .find(|u| u.session_token.as_deref() == Some(token))
            .cloned();
        Ok(user)
    }

    async fn update(&self, user: User) -> AccountResult<User> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(AccountError::NotFound(user.id));
        }

        let email_exists = users
            .values()
            .any(|u| u.id != user.id && u.email.eq_ignore_ascii_case(&user.email));

        if email_exists {
            return Err(AccountError::DuplicateEmail(user.email));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> AccountResult<bool> {
        let mut users = self.users.write().await;

        if users.remove(&id).is_some() {
            tracing::info!(user_id = %id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn email_exists(&self, email: &str) -> AccountResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email.eq_ignore_ascii_case(email)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use access_control::Role;

    fn user(email: &str) -> User {
        User::new(
            "Test User".to_string(),
            email.to_string(),
            "hashed_password".to_string(),
            Role::Customer,
        )
    }

    #[tokio::test]
    async fn create_and_get_user() {
        let repo = InMemoryUserRepository::new();

        let created = repo.create(user("test@example.com")).await.unwrap();
        assert_eq!(created.email, "test@example.com");

        let fetched = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched.unwrap().id, created.id);
    }

    #[tokio::test]
    async fn get_by_email_is_case_insensitive() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("test@example.com")).await.unwrap();

        assert!(repo.get_by_email("TEST@EXAMPLE.COM").await.unwrap().is_some());
        assert!(repo.get_by_email("other@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("test@example.com")).await.unwrap();

        let result = repo.create(user("Test@Example.com")).await;
        assert!(matches!(result, Err(AccountError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn lookup_by_session_token() {
        let repo = InMemoryUserRepository::new();
        let mut u = user("test@example.com");
        u.session_token = Some("tok-123".to_string());
        repo.create(u.clone()).await.unwrap();

        let found = repo.get_by_session_token("tok-123").await.unwrap();
        assert_eq!(found.unwrap().id, u.id);

        assert!(repo.get_by_session_token("tok-456").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_a_record_existed() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(user("test@example.com")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn update_rejects_email_taken_by_another_user() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("first@example.com")).await.unwrap();
        let mut second = repo.create(user("second@example.com")).await.unwrap();

        second.email = "first@example.com".to_string();
        let result = repo.update(second).await;
        assert!(matches!(result, Err(AccountError::DuplicateEmail(_))));
    }
}
