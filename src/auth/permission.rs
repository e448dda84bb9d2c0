use std::fmt;

use serde::{Deserialize, Serialize};

/// A single grantable capability, each gating one record operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    CanView,
    CanCreate,
    CanEdit,
    CanDelete,
}

impl Permission {
    pub fn codename(self) -> &'static str {
        match self {
            Permission::CanView => "can_view",
            Permission::CanCreate => "can_create",
            Permission::CanEdit => "can_edit",
            Permission::CanDelete => "can_delete",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.codename())
    }
}

/// A record operation a caller can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    View,
    Create,
    Edit,
    Delete,
}

impl Operation {
    /// Fixed operation-to-permission table.
    pub fn required_permission(self) -> Permission {
        match self {
            Operation::View => Permission::CanView,
            Operation::Create => Permission::CanCreate,
            Operation::Edit => Permission::CanEdit,
            Operation::Delete => Permission::CanDelete,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::View => "view",
            Operation::Create => "create",
            Operation::Edit => "edit",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}
