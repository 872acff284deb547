//! Exit codes for the anypay CLI.
//!
//! Following standard Unix conventions and providing specific codes
//! for different error categories to aid scripting and automation.

/// Exit codes for the anypay CLI.
///
/// These codes follow Unix conventions where possible:
/// - 0: Success
/// - 1: General error
/// - 2: Misuse of shell command (e.g., invalid arguments)
/// - 130: Script terminated by Ctrl+C (128 + SIGINT)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful execution
    Success = 0,

    /// General/unknown error
    GeneralError = 1,

    /// Invalid usage (bad arguments, invalid amounts)
    InvalidUsage = 2,

    /// Configuration error (missing config, missing credentials)
    ConfigError = 3,

    /// Network/connection error
    NetworkError = 4,

    /// AnyPay rejected the request
    ApiRejected = 5,

    /// AnyPay answered with something that could not be used
    ProtocolError = 6,

    /// Operation timed out
    Timeout = 10,

    /// Interrupted by signal (Ctrl+C)
    /// Standard Unix convention: 128 + signal number (SIGINT = 2)
    Interrupted = 130,
}

impl ExitCode {
    /// Convert to process exit code
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Exit the process with this code
    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.code()
    }
}

impl From<&anyhow::Error> for ExitCode {
    fn from(err: &anyhow::Error) -> Self {
        if let Some(anypay_err) = err.downcast_ref::<anypay_lib::AnypayError>() {
            return ExitCode::from(anypay_err);
        }

        // Check error message for common patterns
        let msg = err.to_string().to_lowercase();

        if msg.contains("timed out") {
            ExitCode::Timeout
        } else if msg.contains("connection") || msg.contains("network") {
            ExitCode::NetworkError
        } else if msg.contains("config") {
            ExitCode::ConfigError
        } else {
            ExitCode::GeneralError
        }
    }
}

impl From<&anypay_lib::AnypayError> for ExitCode {
    fn from(err: &anypay_lib::AnypayError) -> Self {
        use anypay_lib::AnypayError;

        match err {
            AnypayError::Configuration(_)
            | AnypayError::InvalidConfig(_)
            | AnypayError::InvalidUrl { .. }
            | AnypayError::NoConfigDir
            | AnypayError::TomlParse(_)
            | AnypayError::TomlSerialize(_) => ExitCode::ConfigError,

            AnypayError::Transport(msg) if msg.contains("timed out") => ExitCode::Timeout,
            AnypayError::Transport(_) => ExitCode::NetworkError,

            AnypayError::Api { .. } => ExitCode::ApiRejected,

            AnypayError::Protocol(_)
            | AnypayError::HttpStatus { .. }
            | AnypayError::Decoding(_) => ExitCode::ProtocolError,

            AnypayError::Signing(_) => ExitCode::InvalidUsage,

            AnypayError::Io(_) => ExitCode::GeneralError,
        }
    }
}
