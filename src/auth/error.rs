use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Bad username or password. Deliberately does not say which.
    InvalidCredentials,
    /// The presented token is absent or has been revoked.
    UnknownToken,
    UsernameTaken(String),
    InvalidUsername(String),
    Hash(String),
    LockPoisoned(&'static str),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "invalid username or password"),
            AuthError::UnknownToken => write!(f, "invalid or revoked token"),
            AuthError::UsernameTaken(username) => {
                write!(f, "username {} is already registered", username)
            }
            AuthError::InvalidUsername(username) => {
                write!(f, "invalid username {:?}", username)
            }
            AuthError::Hash(message) => write!(f, "password hashing failed: {}", message),
            AuthError::LockPoisoned(operation) => {
                write!(f, "auth state lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for AuthError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_credentials_does_not_name_the_field() {
        let message = AuthError::InvalidCredentials.to_string();
        assert_eq!(message, "invalid username or password");
        assert!(!message.contains("unknown"));
        assert!(!message.contains("wrong"));
    }

    #[test]
    fn display() {
        assert_eq!(
            AuthError::UnknownToken.to_string(),
            "invalid or revoked token"
        );
        assert_eq!(
            AuthError::UsernameTaken("alice".to_string()).to_string(),
            "username alice is already registered"
        );
    }
}
