use std::collections::BTreeMap;

use super::permission::Permission;
use super::role::Role;

/// Role-to-permission mapping consulted by the gate.
///
/// The built-in table is the fixed mapping carried by [`Role::permissions`].
/// [`provision`](RoleTable::provision) is the one administrative step that may
/// install a different set for a role; nothing else mutates the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleTable {
    grants: BTreeMap<Role, Vec<Permission>>,
}

impl RoleTable {
    /// The fixed built-in mapping: Viewer, Editor, and Admin with their
    /// standard permission sets.
    pub fn builtin() -> Self {
        let grants = Role::ALL
            .iter()
            .map(|role| (*role, role.permissions().to_vec()))
            .collect();
        RoleTable { grants }
    }

    pub fn permissions(&self, role: Role) -> &[Permission] {
        self.grants.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn grants(&self, role: Role, permission: Permission) -> bool {
        self.permissions(role).contains(&permission)
    }

    /// Administrative re-provisioning: replaces a role's permission set.
    pub fn provision(&mut self, role: Role, permissions: Vec<Permission>) {
        self.grants.insert(role, permissions);
    }
}

impl Default for RoleTable {
    fn default() -> Self {
        Self::builtin()
    }
}
