use tracing::{error, info};

use crate::AttemptError;

/// Receives waiter diagnostics.
///
/// Each call carries either an informational message (with `error` set to
/// `None`) or an attempt error (with an empty `message`), never both.
pub trait OutputSink {
    fn output(&mut self, message: &str, error: Option<&AttemptError>);
}

impl<F> OutputSink for F
where
    F: FnMut(&str, Option<&AttemptError>),
{
    fn output(&mut self, message: &str, error: Option<&AttemptError>) {
        self(message, error)
    }
}

/// Default sink: messages go to `info!`, attempt errors to `error!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingOutput;

impl OutputSink for TracingOutput {
    fn output(&mut self, message: &str, attempt_error: Option<&AttemptError>) {
        if !message.is_empty() {
            info!("{}", message);
        }
        if let Some(attempt_error) = attempt_error {
            error!(resource = %attempt_error.resource_name, attempt = attempt_error.attempt, "{}", attempt_error);
        }
    }
}
