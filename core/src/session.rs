//! Per-user session context.
//!
//! Operations that depend on who is acting take a [`Session`] explicitly
//! instead of consulting a process-wide flag. Identity is whatever the client
//! claims: there is no authentication, so `user_id` is trusted as supplied.

use serde::{Deserialize, Serialize};

/// User id used by the portal when nobody has identified themselves.
pub const GUEST_USER_ID: &str = "current-user-id";

/// Display name used by the portal when nobody has identified themselves.
pub const GUEST_USERNAME: &str = "Current User";

/// Who is acting, and with which privileges.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque user identity, used as the RSVP ledger key
    pub user_id: String,
    /// Display label copied into RSVPs, replies and topics
    pub username: String,
    /// Whether the user may post or remove announcements and threads
    pub is_admin: bool,
}

impl Session {
    /// A regular member session.
    #[must_use]
    pub fn member(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            is_admin: false,
        }
    }

    /// An administrator session.
    #[must_use]
    pub fn admin(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            is_admin: true,
            ..Self::member(user_id, username)
        }
    }

    /// The anonymous browser session.
    #[must_use]
    pub fn guest() -> Self {
        Self::member(GUEST_USER_ID, GUEST_USERNAME)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::guest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_is_not_admin() {
        let session = Session::guest();
        assert_eq!(session.user_id, GUEST_USER_ID);
        assert_eq!(session.username, GUEST_USERNAME);
        assert!(!session.is_admin);
    }

    #[test]
    fn admin_keeps_identity() {
        let session = Session::admin("a1", "Admin");
        assert!(session.is_admin);
        assert_eq!(session.user_id, "a1");
    }
}
