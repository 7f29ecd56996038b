//! Client-side input validation
//!
//! Checks run before a request is sent. A failure never reaches the network.

use crate::api::Credentials;
use thiserror::Error;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 10;

/// Maximum world name length (characters)
pub const MAX_WORLD_NAME_LEN: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Username and password are required.")]
    MissingCredentials,
    #[error("Password must be at least 10 characters and contain an uppercase letter, a lowercase letter, a digit and a special character.")]
    WeakPassword,
    #[error("World name must be between 1 and 25 characters.")]
    WorldNameLength,
}

/// Trim both fields and reject empty ones
pub fn validate_credentials(username: &str, password: &str) -> Result<Credentials, ValidationError> {
    let username = username.trim();
    let password = password.trim();
    if username.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(Credentials::new(username, password))
}

/// Registration password policy: length >= 10 with lower, upper, digit and symbol
pub fn is_valid_password(password: &str) -> bool {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return false;
    }

    let (mut lower, mut upper, mut digit, mut special) = (false, false, false, false);
    for c in password.chars() {
        if c.is_lowercase() {
            lower = true;
        } else if c.is_uppercase() {
            upper = true;
        } else if c.is_ascii_digit() {
            digit = true;
        } else if !c.is_alphabetic() {
            // Superscripts and fractions count as symbols
            special = true;
        }
    }

    lower && upper && digit && special
}

/// Credentials for registration: non-empty fields and a policy-conforming password
pub fn validate_registration(username: &str, password: &str) -> Result<Credentials, ValidationError> {
    let credentials = validate_credentials(username, password)?;
    if !is_valid_password(&credentials.password) {
        return Err(ValidationError::WeakPassword);
    }
    Ok(credentials)
}

/// Trimmed world name with 1..=25 characters
pub fn validate_world_name(name: &str) -> Result<&str, ValidationError> {
    let name = name.trim();
    let len = name.chars().count();
    if len == 0 || len > MAX_WORLD_NAME_LEN {
        return Err(ValidationError::WorldNameLength);
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_policy() {
        assert!(is_valid_password("Abcdefg1!2"));
        assert!(!is_valid_password("abcdefg123"));
        // Nine chars, every class present
        assert!(!is_valid_password("Abcdef1!2"));
        assert!(!is_valid_password("ABCDEFG1!2"));
        assert!(!is_valid_password("Abcdefgh!!"));
        assert!(!is_valid_password("Abcdefgh12"));
    }

    #[test]
    fn test_world_name_bounds() {
        assert_eq!(validate_world_name(""), Err(ValidationError::WorldNameLength));
        assert_eq!(validate_world_name("   "), Err(ValidationError::WorldNameLength));
        assert_eq!(validate_world_name("a"), Ok("a"));

        let exactly_25 = "x".repeat(25);
        assert_eq!(validate_world_name(&exactly_25), Ok(exactly_25.as_str()));

        let too_long = "x".repeat(26);
        assert_eq!(validate_world_name(&too_long), Err(ValidationError::WorldNameLength));
    }

    #[test]
    fn test_world_name_is_trimmed() {
        assert_eq!(validate_world_name("  Lobby \n"), Ok("Lobby"));
        // Surrounding whitespace does not count toward the limit
        let padded = format!("  {}  ", "y".repeat(25));
        assert!(validate_world_name(&padded).is_ok());
    }

    #[test]
    fn test_world_name_counts_characters() {
        let name = "é".repeat(25);
        assert!(validate_world_name(&name).is_ok());
    }

    #[test]
    fn test_credentials_trimmed_and_required() {
        let creds = validate_credentials("  alice ", " secret ").unwrap();
        assert_eq!(creds, Credentials::new("alice", "secret"));

        assert_eq!(validate_credentials("", "pw"), Err(ValidationError::MissingCredentials));
        assert_eq!(validate_credentials("bob", "  "), Err(ValidationError::MissingCredentials));
    }

    #[test]
    fn test_non_decimal_numerals_are_symbols() {
        // '²' and '½' are not decimal digits
        assert!(is_valid_password("Abcdefgh1²"));
        assert!(is_valid_password("Abcdefgh1½"));
        assert!(!is_valid_password("Abcdefghi²"));
    }

    #[test]
    fn test_registration_checks_policy() {
        assert!(validate_registration("alice", "Abcdefg1!2").is_ok());
        assert_eq!(
            validate_registration("alice", "abcdefg123"),
            Err(ValidationError::WeakPassword)
        );
        assert_eq!(
            validate_registration(" ", "Abcdefg1!2"),
            Err(ValidationError::MissingCredentials)
        );
    }
}
