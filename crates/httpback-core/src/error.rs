//! Dispatch errors.

use thiserror::Error;

/// Errors raised synchronously by [`Dispatcher::send`](crate::Dispatcher::send).
///
/// Transport failures are never reported here; they reach the callback as data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Method name matches neither a transport operation nor an alias
    #[error("The method \"{method}\" does not exists")]
    UnsupportedMethod {
        /// Method exactly as the caller spelled it
        method: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("freaky method")]
    #[case("NOT-A-REAL-METHOD")]
    #[case("")]
    fn test_unsupported_method_display(#[case] method: &str) {
        let error = DispatchError::UnsupportedMethod {
            method: method.to_string(),
        };
        assert_eq!(
            error.to_string(),
            format!("The method \"{}\" does not exists", method)
        );
    }
}
