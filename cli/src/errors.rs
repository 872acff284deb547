//! Error display helpers with actionable suggestions.
//!
//! Provides user-friendly error messages that include suggestions
//! for how to fix common problems.

use crate::colors::Colors;
use anypay_lib::AnypayError;

/// Get a suggestion for how to fix an error, if available.
pub fn get_suggestion(err: &anyhow::Error) -> Option<String> {
    if let Some(anypay_err) = err.downcast_ref::<AnypayError>() {
        return get_anypay_error_suggestion(anypay_err);
    }

    // Check error message for common patterns
    let msg = err.to_string().to_lowercase();

    if msg.contains("permission denied") {
        return Some("Check file permissions or run with appropriate privileges.".into());
    }

    None
}

/// Get suggestion for a specific AnypayError variant.
fn get_anypay_error_suggestion(err: &AnypayError) -> Option<String> {
    match err {
        AnypayError::NoConfigDir => {
            Some("Could not determine home directory. Set the HOME environment variable.".into())
        }

        AnypayError::InvalidConfig(msg) => {
            if msg.contains("not found") || msg.contains("must not be empty") {
                Some(
                    "Create a config file with 'anypay config init --account-id <ID> --api-key <KEY>'\n\
                     or pass the credentials via ANYPAY_ACCOUNT_ID and ANYPAY_API_KEY."
                        .into(),
                )
            } else {
                Some("Run 'anypay config validate' to check your configuration.".into())
            }
        }

        AnypayError::InvalidUrl { .. } => {
            Some("URLs must be absolute, e.g. https://anypay.io/api".into())
        }

        AnypayError::Configuration(msg) => {
            if msg.contains("project id") {
                Some("Set project_id in the config file, pass --project-id or ANYPAY_PROJECT_ID.".into())
            } else if msg.contains("secret") {
                Some("Set secret in the config file, pass --secret or ANYPAY_SECRET.".into())
            } else {
                None
            }
        }

        AnypayError::Transport(msg) => {
            if msg.contains("timed out") {
                Some("The request timed out. Try again or increase the timeout with --max-time.".into())
            } else {
                Some("Check your internet connection and the configured api_url, then try again.".into())
            }
        }

        AnypayError::Api { message, .. } => {
            let msg = message.to_lowercase();
            if msg.contains("sign") {
                Some("The signature was rejected. Check account_id and api_key.".into())
            } else if msg.contains("ip") {
                Some("Allow this machine's IP address in the AnyPay API settings.".into())
            } else {
                None
            }
        }

        AnypayError::HttpStatus { status, .. } => {
            if *status == 401 || *status == 403 {
                Some("Authentication failed. Check account_id and api_key.".into())
            } else if *status == 404 {
                Some("The endpoint was not found. Check the configured api_url.".into())
            } else if *status >= 500 {
                Some("Server error. Try again later.".into())
            } else {
                None
            }
        }

        AnypayError::Decoding(_) => Some(
            "The response did not match the expected format. Run with -vv to see the request.".into(),
        ),

        AnypayError::Signing(_) => Some("Amounts must be finite numbers.".into()),

        _ => None,
    }
}

/// Format an error with its suggestion for display.
pub fn format_error_with_suggestion(err: &anyhow::Error) -> String {
    let mut output = format!("{} {err:#}", Colors::error("Error:"));

    if let Some(suggestion) = get_suggestion(err) {
        output.push_str(&format!("\n\n{}:\n", Colors::info("Suggestion")));
        output.push_str(&suggestion);
    }

    if let Some(related) = get_related_commands(err) {
        output.push_str(&format!("\n\n{}:\n", Colors::info("Related commands")));
        for cmd in related {
            output.push_str(&format!("  {}\n", cmd));
        }
    }

    output
}

/// Get related commands that might help fix an error.
fn get_related_commands(err: &anyhow::Error) -> Option<Vec<&'static str>> {
    match err.downcast_ref::<AnypayError>()? {
        AnypayError::InvalidConfig(_) | AnypayError::Configuration(_) => Some(vec![
            "anypay config            # View current configuration",
            "anypay config validate   # Check the config file",
            "anypay config init       # Create a config file",
        ]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_project_id_suggestion() {
        let err = AnypayError::configuration("'commissions' requires a project id.");
        let suggestion = get_anypay_error_suggestion(&err).unwrap();
        assert!(suggestion.contains("--project-id"));
    }

    #[test]
    fn test_missing_config_suggestion() {
        let err = AnypayError::InvalidConfig("account_id must not be empty".into());
        let suggestion = get_anypay_error_suggestion(&err).unwrap();
        assert!(suggestion.contains("anypay config init"));
    }

    #[test]
    fn test_timeout_suggestion() {
        let err = AnypayError::transport("operation timed out");
        let suggestion = get_anypay_error_suggestion(&err).unwrap();
        assert!(suggestion.contains("--max-time"));
    }
}
