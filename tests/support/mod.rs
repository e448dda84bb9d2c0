#![allow(dead_code)]

use bookshelf::{Identity, Role, TokenIssuer};

// bcrypt minimum cost; production uses HASH_COST.
pub const TEST_HASH_COST: u32 = 4;

pub const VIEWER_PASSWORD: &str = "viewer-pass";
pub const EDITOR_PASSWORD: &str = "editor-pass";
pub const ADMIN_PASSWORD: &str = "admin-pass";
pub const ROOT_PASSWORD: &str = "root-pass";

/// Issuer seeded with one account per role plus a superuser.
pub fn seeded_issuer() -> TokenIssuer {
    let issuer = TokenIssuer::with_cost(TEST_HASH_COST);
    issuer
        .register("vera", VIEWER_PASSWORD, vec![Role::Viewer])
        .unwrap();
    issuer
        .register("edgar", EDITOR_PASSWORD, vec![Role::Editor])
        .unwrap();
    issuer
        .register("ada", ADMIN_PASSWORD, vec![Role::Admin])
        .unwrap();
    issuer.register_superuser("root", ROOT_PASSWORD).unwrap();
    issuer
}

pub fn viewer() -> Identity {
    Identity::new(101, "vera", vec![Role::Viewer], false)
}

pub fn editor() -> Identity {
    Identity::new(102, "edgar", vec![Role::Editor], false)
}

pub fn admin() -> Identity {
    Identity::new(103, "ada", vec![Role::Admin], false)
}

pub fn superuser() -> Identity {
    Identity::new(104, "root", Vec::new(), true)
}

pub fn nobody() -> Identity {
    Identity::new(105, "nate", Vec::new(), false)
}
