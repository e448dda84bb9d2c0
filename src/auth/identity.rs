use std::fmt;

use serde::{Deserialize, Serialize};

use super::role::Role;

/// An authenticated caller: a user id, the roles assigned to it, and an
/// optional superuser flag.
///
/// Identities are immutable value types resolved by the token issuer (or by a
/// session layer outside this crate) and then handed to the permission gate.
/// There is no default identity; always construct with [`Identity::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    user_id: u64,
    username: String,
    roles: Vec<Role>,
    superuser: bool,
}

impl Identity {
    pub fn new(user_id: u64, username: impl Into<String>, roles: Vec<Role>, superuser: bool) -> Self {
        Identity {
            user_id,
            username: username.into(),
            roles,
            superuser,
        }
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_superuser(&self) -> bool {
        self.superuser
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)
    }
}
