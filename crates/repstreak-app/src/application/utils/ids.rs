use repstreak_domain::shared::{DomainError, UserId};

/// Parse a caller-supplied user id, rejecting blank ones
pub fn parse_user_id(value: &str) -> Result<UserId, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation("User id cannot be empty".to_string()));
    }
    Ok(UserId::from_string(trimmed))
}
