//! Optional per-connection identity.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use casedesk_core::types::UserId;
use casedesk_core::AppResult;
use casedesk_entity::user::UserRole;

/// Identity attached to a connection that presented a valid token.
///
/// Connections without one are anonymous: they receive broadcasts but can
/// never be targeted by user-directed delivery. The duality is explicit —
/// a handle carries `Option<ConnectionIdentity>`, never a half-filled one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionIdentity {
    /// The connected user.
    pub user_id: UserId,
    /// The user's role.
    pub role: UserRole,
}

/// Token verification boundary for connection establishment.
///
/// Implemented by the auth collaborator; the hub only consumes the result.
/// Verification failures degrade the connection to anonymous rather than
/// rejecting it.
#[async_trait]
pub trait IdentityVerifier: Send + Sync + 'static {
    /// Verify a presented token and return the identity it encodes.
    async fn verify(&self, token: &str) -> AppResult<ConnectionIdentity>;
}
