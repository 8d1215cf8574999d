//! Pre-flight checks before expensive operations.
//!
//! Validates that required configuration is available before starting
//! operations that would otherwise fail midway.

use crate::error::{Result, VidaskError};
use crate::openai::is_api_key_configured;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Answering a question calls the embedding and chat APIs.
    Ask,
    /// The server answers questions too.
    Serve,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation) -> Result<()> {
    match operation {
        Operation::Ask | Operation::Serve => check_api_key(),
    }
}

fn check_api_key() -> Result<()> {
    if is_api_key_configured() {
        Ok(())
    } else {
        Err(VidaskError::Config(
            "OPENAI_API_KEY is not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answering_operations_require_api_key() {
        let configured = is_api_key_configured();
        for operation in [Operation::Ask, Operation::Serve] {
            match check(operation) {
                Ok(()) => assert!(configured),
                Err(e) => {
                    assert!(!configured);
                    assert!(e.to_string().contains("OPENAI_API_KEY"));
                }
            }
        }
    }
}
