//! Process exit codes
//!
//! Reported to the shell at the end of every invocation. JSON-mode callers
//! rely on these rather than parsing error text.

/// Exit codes for the `ba` process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operation completed
    Success = 0,
    /// Remote service reported an error
    GeneralError = 1,
    /// Required flags missing or invalid for the selected action
    UsageError = 2,
    /// The named resource does not exist
    NotFound = 5,
    /// Client construction or transport failure
    NetworkError = 7,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success as i32, 0);
        assert_eq!(ExitCode::GeneralError as i32, 1);
        assert_eq!(ExitCode::UsageError as i32, 2);
        assert_eq!(ExitCode::NotFound as i32, 5);
        assert_eq!(ExitCode::NetworkError as i32, 7);
    }
}
