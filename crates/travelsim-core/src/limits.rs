//! Input validation limits for entity names

/// Maximum length for entity names (256 bytes)
pub const MAX_NAME_LEN: usize = 256;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyName,
    NameTooLong { len: usize, max: usize },
    WhitespaceInName(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name cannot be empty"),
            Self::NameTooLong { len, max } => {
                write!(f, "Name too long: {} bytes (max {})", len, max)
            }
            Self::WhitespaceInName(name) => {
                write!(f, "Name cannot contain whitespace: '{}'", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate an entity name
///
/// Names are single tokens so that command scripts can address them.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong {
            len: name.len(),
            max: MAX_NAME_LEN,
        });
    }
    if name.chars().any(char::is_whitespace) {
        return Err(ValidationError::WhitespaceInName(name.to_string()));
    }
    Ok(())
}
