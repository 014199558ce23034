//! Value ranges and resource limits

use serde::{Deserialize, Deserializer};

/// Weakest edge strength
pub const MIN_STRENGTH: i64 = 1;

/// Strongest edge strength
pub const MAX_STRENGTH: i64 = 10;

/// Strength used when the caller does not provide one
pub const DEFAULT_STRENGTH: u8 = 5;

/// Simplest node complexity
pub const MIN_COMPLEXITY: i64 = 1;

/// Most advanced node complexity
pub const MAX_COMPLEXITY: i64 = 5;

/// Maximum neighborhood traversal depth (50)
pub const MAX_TRAVERSAL_DEPTH: u32 = 50;

/// Largest cyclic graph the exhaustive critical-path search will run on
pub const DEFAULT_CRITICAL_PATH_NODE_LIMIT: usize = 64;

/// Path extensions the exhaustive critical-path search may try before giving up
pub const MAX_CRITICAL_PATH_EXTENSIONS: usize = 250_000;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    TraversalDepthTooLarge { depth: u32, max: u32 },
    InvalidComplexityRange { min: u8, max: u8 },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TraversalDepthTooLarge { depth, max } => {
                write!(f, "Traversal depth too large: {} (max {})", depth, max)
            }
            Self::InvalidComplexityRange { min, max } => {
                write!(f, "Invalid complexity range: {}..={}", min, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for crate::Error {
    fn from(e: ValidationError) -> Self {
        crate::Error::Validation(e.to_string())
    }
}

/// Clamp an edge strength into `[1, 10]`
pub fn clamp_strength(strength: i64) -> u8 {
    strength.clamp(MIN_STRENGTH, MAX_STRENGTH) as u8
}

/// Clamp a node complexity into `[1, 5]`
pub fn clamp_complexity(complexity: i64) -> u8 {
    complexity.clamp(MIN_COMPLEXITY, MAX_COMPLEXITY) as u8
}

/// Read any JSON number into a `u8`, saturating at `0` and `255`.
///
/// Imported documents keep out-of-range values instead of failing to parse.
pub(crate) fn saturating_u8<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(value.clamp(0.0, f64::from(u8::MAX)) as u8)
}

/// Validate traversal depth
pub fn validate_traversal_depth(depth: u32) -> Result<(), ValidationError> {
    if depth > MAX_TRAVERSAL_DEPTH {
        return Err(ValidationError::TraversalDepthTooLarge {
            depth,
            max: MAX_TRAVERSAL_DEPTH,
        });
    }
    Ok(())
}

/// Validate an inclusive complexity range
pub fn validate_complexity_range(min: u8, max: u8) -> Result<(), ValidationError> {
    if min > max {
        return Err(ValidationError::InvalidComplexityRange { min, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_strength() {
        assert_eq!(clamp_strength(0), 1);
        assert_eq!(clamp_strength(-40), 1);
        assert_eq!(clamp_strength(7), 7);
        assert_eq!(clamp_strength(11), 10);
        assert_eq!(clamp_strength(i64::MAX), 10);
    }

    #[test]
    fn test_clamp_complexity() {
        assert_eq!(clamp_complexity(0), 1);
        assert_eq!(clamp_complexity(3), 3);
        assert_eq!(clamp_complexity(9), 5);
    }

    #[derive(Deserialize)]
    struct Level {
        #[serde(deserialize_with = "saturating_u8")]
        level: u8,
    }

    #[test]
    fn test_saturating_u8() {
        let parse = |json: &str| serde_json::from_str::<Level>(json).unwrap().level;
        assert_eq!(parse(r#"{"level": 7}"#), 7);
        assert_eq!(parse(r#"{"level": 300}"#), 255);
        assert_eq!(parse(r#"{"level": -1}"#), 0);
        assert_eq!(parse(r#"{"level": 2.5}"#), 2);
        assert!(serde_json::from_str::<Level>(r#"{"level": "high"}"#).is_err());
    }

    #[test]
    fn test_validate_traversal_depth() {
        assert!(validate_traversal_depth(3).is_ok());
        assert!(validate_traversal_depth(MAX_TRAVERSAL_DEPTH).is_ok());
        assert!(validate_traversal_depth(MAX_TRAVERSAL_DEPTH + 1).is_err());
    }

    #[test]
    fn test_validate_complexity_range() {
        assert!(validate_complexity_range(1, 2).is_ok());
        assert!(validate_complexity_range(3, 3).is_ok());
        assert!(validate_complexity_range(4, 2).is_err());
    }
}
