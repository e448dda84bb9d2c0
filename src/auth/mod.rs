mod error;
mod gate;
mod identity;
mod issuer;
mod password;
mod permission;
mod role;
mod table;

pub use error::AuthError;
pub use gate::{Access, PermissionDenied, PermissionGate};
pub use identity::Identity;
pub use issuer::{Token, TokenIssuer};
pub use password::{hash_password, verify_password, HASH_COST};
pub use permission::{Operation, Permission};
pub use role::Role;
pub use table::RoleTable;
