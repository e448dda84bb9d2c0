use serde::{Deserialize, Serialize};

/// Deployment security settings consumed by a transport layer outside this
/// core. The core never reads these; they travel with the application so the
/// surface serving it can apply one consistent policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub csrf_cookie_secure: bool,
    pub session_cookie_secure: bool,
    pub secure_ssl_redirect: bool,
    /// Strict-Transport-Security max-age in seconds. Zero disables the header.
    pub hsts_seconds: u32,
    pub content_type_nosniff: bool,
    pub xss_filter: bool,
    /// Sets X-Frame-Options: DENY (clickjacking protection).
    pub deny_framing: bool,
    pub content_security_policy: String,
}

impl SecurityConfig {
    /// Production preset: secure cookies, SSL redirect, one-year HSTS, and a
    /// same-origin content security policy.
    pub fn hardened() -> Self {
        SecurityConfig {
            csrf_cookie_secure: true,
            session_cookie_secure: true,
            secure_ssl_redirect: true,
            hsts_seconds: 31_536_000,
            content_type_nosniff: true,
            xss_filter: true,
            deny_framing: true,
            content_security_policy: concat!(
                "default-src 'self'; ",
                "script-src 'self' 'unsafe-inline'; ",
                "style-src 'self' 'unsafe-inline'; ",
                "img-src 'self' data:; ",
                "font-src 'self'; ",
                "connect-src 'self'; ",
                "frame-ancestors 'none';"
            )
            .to_string(),
        }
    }

    /// Response headers a transport should attach, in a fixed order.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = Vec::new();
        if !self.content_security_policy.is_empty() {
            headers.push((
                "Content-Security-Policy",
                self.content_security_policy.clone(),
            ));
        }
        if self.content_type_nosniff {
            headers.push(("X-Content-Type-Options", "nosniff".to_string()));
        }
        if self.deny_framing {
            headers.push(("X-Frame-Options", "DENY".to_string()));
        }
        if self.xss_filter {
            headers.push(("X-XSS-Protection", "1; mode=block".to_string()));
        }
        if self.hsts_seconds > 0 {
            headers.push((
                "Strict-Transport-Security",
                format!("max-age={}", self.hsts_seconds),
            ));
        }
        headers
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::hardened()
    }
}
