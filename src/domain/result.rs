//! Result type alias for convoscrub
//!
//! This module provides a convenient Result type alias that uses
//! [`ScrubError`] as the error type.

use super::errors::ScrubError;

/// Result type alias for convoscrub operations
///
/// # Examples
///
/// ```
/// use convoscrub::domain::result::Result;
/// use convoscrub::domain::errors::ScrubError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ScrubError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ScrubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
