//! Access Control
//!
//! The authorization policy for the store backend: a pure decision
//! function mapping (actor, operation, resource owner) to an outcome.
//!
//! The policy has no I/O and no ambient state. Callers resolve the actor
//! from the request's session token and pass it in explicitly; the policy
//! is re-evaluated on every call and never cached.
//!
//! Two denial outcomes are distinguished and must never be collapsed:
//! [`Decision::DeniedUnauthenticated`] (no valid session, maps to 401)
//! and [`Decision::DeniedForbidden`] (valid session, insufficient role or
//! ownership, maps to 403).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Privilege class of an account, fixed at registration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Customer => write!(f, "customer"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// The identity performing a request, resolved from its session token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Operations subject to the authorization policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ViewProfile,
    UpdateProfile,
    DeleteProfile,
    CreateProduct,
    ViewProduct,
    UpdateProduct,
    DeleteProduct,
    ListProducts,
    SearchProducts,
}

/// Outcome of an authorization check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    /// No valid session; callers surface this as an authentication failure
    DeniedUnauthenticated,
    /// Valid session but insufficient role or ownership
    DeniedForbidden,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }
}

/// Authorize an operation for an optional actor.
///
/// `actor` is `None` when the request carried no valid session token.
/// `resource_owner` is consulted only for profile operations; product
/// mutation checks role alone and never ownership.
pub fn authorize(
    actor: Option<&Actor>,
    operation: Operation,
    resource_owner: Option<Uuid>,
) -> Decision {
    let Some(actor) = actor else {
        return Decision::DeniedUnauthenticated;
    };

    match operation {
        Operation::ViewProfile | Operation::UpdateProfile | Operation::DeleteProfile => {
            match resource_owner {
                Some(owner) if owner == actor.id => Decision::Allowed,
                _ => Decision::DeniedForbidden,
            }
        }
        Operation::CreateProduct | Operation::ViewProduct | Operation::SearchProducts => {
            Decision::Allowed
        }
        Operation::UpdateProduct | Operation::DeleteProduct | Operation::ListProducts => {
            if actor.is_admin() {
                Decision::Allowed
            } else {
                Decision::DeniedForbidden
            }
        }
    }
}
