//! Validation helpers for DTOs.

use validator::ValidationError;

/// Validates that a team name contains at least one letter or digit.
///
/// # Examples
///
/// ```ignore
/// validate_team_name("Red Bull") // Ok
/// validate_team_name("мерс")     // Ok
/// validate_team_name(" -- ")     // Err - no letters
/// ```
pub fn validate_team_name(name: &str) -> Result<(), ValidationError> {
    if !name.chars().any(char::is_alphanumeric) {
        let mut err = ValidationError::new("team_name_format");
        err.message = Some("Team name must contain at least one letter or digit".into());
        return Err(err);
    }

    if name.chars().count() > 64 {
        let mut err = ValidationError::new("team_name_length");
        err.message = Some(
            format!(
                "Team name must be at most 64 characters (got {})",
                name.chars().count()
            )
            .into(),
        );
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_team_name_valid() {
        assert!(validate_team_name("WILLIAMS").is_ok());
        assert!(validate_team_name("ред булл").is_ok());
        assert!(validate_team_name("Aston Martin").is_ok());
    }

    #[test]
    fn test_validate_team_name_invalid() {
        assert!(validate_team_name("").is_err());
        assert!(validate_team_name("  ").is_err());
        assert!(validate_team_name("!?").is_err());
        assert!(validate_team_name(&"x".repeat(65)).is_err());
    }
}
