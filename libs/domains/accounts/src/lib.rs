//! Accounts Domain
//!
//! User registration, login/logout, session identity, and profile CRUD.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, session cookie transport
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │   Service   │  ← authorization checks, password hashing
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │   Session   │  ← opaque token mint/clear/resolve
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │ Repository  │  ← data access (trait + implementations)
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_accounts::{
//!     handlers,
//!     repository::InMemoryUserRepository,
//!     service::AccountService,
//! };
//!
//! let repository = InMemoryUserRepository::new();
//! let service = AccountService::new(repository);
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod session;

pub use error::{AccountError, AccountResult};
pub use handlers::ApiDoc;
pub use models::{LoginRequest, RegisterRequest, UpdateProfile, User, UserResponse};
pub use postgres::PostgresUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::{AccountService, LogoutOutcome};
pub use session::SessionManager;

// Role and Actor are defined by the access-control policy crate
pub use access_control::{Actor, Role};
