use std::fmt;

use super::identity::Identity;
use super::permission::{Operation, Permission};
use super::table::RoleTable;

/// Result of a permission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// The identity may perform the operation.
    Allowed,
    /// The identity lacks the required permission.
    Denied {
        operation: Operation,
        required: Permission,
    },
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allowed)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Access::Denied { .. })
    }
}

/// Error signaled when an operation is rejected, analogous to HTTP 403.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionDenied {
    pub operation: Operation,
    pub required: Permission,
}

impl fmt::Display for PermissionDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "permission denied: {} requires {}",
            self.operation, self.required
        )
    }
}

impl std::error::Error for PermissionDenied {}

/// Checks whether an identity may perform an operation.
///
/// The check is pure: it reads the identity's roles and the role table and
/// mutates nothing. Superuser bypass is an explicit first rule, not a side
/// effect of how identities are loaded.
#[derive(Clone, Debug, Default)]
pub struct PermissionGate {
    table: RoleTable,
}

impl PermissionGate {
    /// Gate over the built-in role table.
    pub fn new() -> Self {
        PermissionGate {
            table: RoleTable::builtin(),
        }
    }

    /// Gate over a re-provisioned role table.
    pub fn with_table(table: RoleTable) -> Self {
        PermissionGate { table }
    }

    pub fn table(&self) -> &RoleTable {
        &self.table
    }

    pub fn check(&self, identity: &Identity, operation: Operation) -> Access {
        if identity.is_superuser() {
            return Access::Allowed;
        }

        let required = operation.required_permission();
        let granted = identity
            .roles()
            .iter()
            .any(|role| self.table.grants(*role, required));

        if granted {
            Access::Allowed
        } else {
            Access::Denied {
                operation,
                required,
            }
        }
    }

    /// Guard form of [`check`](Self::check), called at every record-store
    /// entry point before the operation executes.
    pub fn authorize(
        &self,
        identity: &Identity,
        operation: Operation,
    ) -> Result<(), PermissionDenied> {
        match self.check(identity, operation) {
            Access::Allowed => Ok(()),
            Access::Denied {
                operation,
                required,
            } => {
                log::debug!(
                    "denied {} for {}: missing {}",
                    operation,
                    identity.username(),
                    required
                );
                Err(PermissionDenied {
                    operation,
                    required,
                })
            }
        }
    }
}
