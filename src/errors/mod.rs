use crate::api::{ApiError, ApiOutcome};
use crate::models::ErrorDescriptor;

/// Prefix of messages built from transport failures.
pub const UNRECOVERABLE_PREFIX: &str = "UNRECOVERABLE ERROR: ";

/// Joins backend error details, each preceded by a single space.
pub fn flatten_errors(errors: &[ErrorDescriptor]) -> String {
    errors.iter().fold(String::new(), |mut acc, e| {
        acc.push(' ');
        acc.push_str(&e.details);
        acc
    })
}

pub fn unrecoverable_message(cause: &ApiError) -> String {
    format!("{UNRECOVERABLE_PREFIX}{cause}")
}

/// A backend call that did not produce data.
#[derive(Clone, Debug, PartialEq)]
pub enum Failure {
    Domain(Vec<ErrorDescriptor>),
    Transport(ApiError),
}

impl Failure {
    /// Text shown on the error view.
    pub fn message(&self) -> String {
        match self {
            Failure::Domain(errors) => flatten_errors(errors),
            Failure::Transport(cause) => unrecoverable_message(cause),
        }
    }

    /// Emits the failure at the level its channel calls for.
    pub fn log(&self, context: &str) {
        match self {
            Failure::Domain(errors) => {
                tracing::warn!(context, errors = errors.len(), "backend reported errors: {}", flatten_errors(errors));
            }
            Failure::Transport(cause) => {
                tracing::error!(context, "unrecoverable backend failure: {cause}");
            }
        }
    }
}

impl<T> ApiOutcome<T> {
    pub fn into_result(self) -> Result<T, Failure> {
        match self {
            ApiOutcome::Data(data) => Ok(data),
            ApiOutcome::Domain(errors) => Err(Failure::Domain(errors)),
            ApiOutcome::Transport(cause) => Err(Failure::Transport(cause)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_single_error_keeps_leading_space() {
        assert_eq!(flatten_errors(&[ErrorDescriptor::new("Not found")]), " Not found");
    }

    #[test]
    fn test_flatten_many_errors() {
        let errors = vec![
            ErrorDescriptor::new("Invalid login."),
            ErrorDescriptor::new("Try again."),
        ];
        assert_eq!(flatten_errors(&errors), " Invalid login. Try again.");
        assert_eq!(flatten_errors(&[]), "");
    }

    #[test]
    fn test_transport_message_prefix() {
        let failure = Failure::Transport(ApiError::Network("connection refused".to_string()));
        assert_eq!(
            failure.message(),
            "UNRECOVERABLE ERROR: network error: connection refused"
        );
    }

    #[test]
    fn test_outcome_into_result() {
        let outcome: ApiOutcome<u8> = ApiOutcome::Domain(vec![ErrorDescriptor::new("x")]);
        assert_eq!(
            outcome.into_result(),
            Err(Failure::Domain(vec![ErrorDescriptor::new("x")]))
        );
        assert_eq!(ApiOutcome::Data(3u8).into_result(), Ok(3));
    }
}
