use std::fmt;

use serde::{Deserialize, Serialize};

use super::permission::Permission;

/// A named, fixed set of permissions. The sets are monotone:
/// Viewer ⊆ Editor ⊆ Admin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Viewer,
    Editor,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Viewer, Role::Editor, Role::Admin];

    /// Built-in permission set for this role.
    pub const fn permissions(self) -> &'static [Permission] {
        match self {
            Role::Viewer => &[Permission::CanView],
            Role::Editor => &[
                Permission::CanView,
                Permission::CanCreate,
                Permission::CanEdit,
            ],
            Role::Admin => &[
                Permission::CanView,
                Permission::CanCreate,
                Permission::CanEdit,
                Permission::CanDelete,
            ],
        }
    }

    pub fn grants(self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Viewer => "Viewer",
            Role::Editor => "Editor",
            Role::Admin => "Admin",
        };
        f.write_str(name)
    }
}
