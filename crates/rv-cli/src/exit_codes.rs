//! Exit codes for the `rv` CLI.
//!
//! - 0: command finished and printed its payload
//! - 1: the display region shows an error, or local I/O failed
//! - 2: configuration could not be loaded or is invalid (clap uses the same
//!   code for bad arguments)

/// Exit codes for `rv` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Clean = 0,

    /// Fetch/generate failure shown in the output, or an I/O error.
    Failure = 1,

    /// Invalid configuration.
    ConfigError = 2,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Clean
    }

    /// Get the code name as a string constant.
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK",
            ExitCode::Failure => "ERR_FAILURE",
            ExitCode::ConfigError => "ERR_CONFIG",
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
