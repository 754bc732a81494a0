//! Result type alias for Prism

use super::errors::PrismError;

/// Result type alias for Prism operations
///
/// # Examples
///
/// ```
/// use prism::domain::result::Result;
/// use prism::domain::errors::PrismError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(PrismError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, PrismError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{ExportError, PrismError};

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(PrismError::Validation("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> std::result::Result<i32, ExportError> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
