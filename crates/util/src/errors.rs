//! Collecting several errors into one.
//!
//! Validation code often wants to report every problem at once instead of
//! stopping at the first one. [`ErrorCollector`] gathers errors as they
//! happen and [`CollectedErrors`] renders them as a single message.

use std::error::Error;
use std::fmt;

/// Accumulates errors in insertion order.
#[derive(Debug)]
pub struct ErrorCollector<E> {
    errors: Vec<E>,
}

impl<E> Default for ErrorCollector<E> {
    fn default() -> Self {
        Self { errors: Vec::new() }
    }
}

impl<E> ErrorCollector<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: E) {
        self.errors.push(error);
    }

    /// Records the error of a failed result and passes successful values through.
    pub fn record<T>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.push(error);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `Ok(())` when nothing was collected, otherwise every collected
    /// error joined with `separator`.
    pub fn into_result(self, separator: &str) -> Result<(), CollectedErrors<E>> {
        if self.errors.is_empty() {
            return Ok(());
        }
        Err(CollectedErrors {
            errors: self.errors,
            separator: separator.to_string(),
        })
    }
}

impl<E> Extend<E> for ErrorCollector<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

/// Non-empty group of errors displayed as one message.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedErrors<E> {
    errors: Vec<E>,
    separator: String,
}

impl<E> CollectedErrors<E> {
    pub fn errors(&self) -> &[E] {
        &self.errors
    }
}

impl<E: fmt::Display> fmt::Display for CollectedErrors<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                f.write_str(&self.separator)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl<E: Error> Error for CollectedErrors<E> {}

/// Joins the given errors, returning `None` when there are none.
pub fn collect_errors<E, I>(separator: &str, errors: I) -> Option<CollectedErrors<E>>
where
    I: IntoIterator<Item = E>,
{
    let mut collector = ErrorCollector::new();
    collector.extend(errors);
    collector.into_result(separator).err()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn error(message: &str) -> io::Error {
        io::Error::other(message.to_string())
    }

    #[test]
    fn empty_collector_is_ok() {
        let collector: ErrorCollector<io::Error> = ErrorCollector::new();
        assert!(collector.is_empty());
        assert!(collector.into_result(",").is_ok());
    }

    #[test]
    fn joins_messages_in_insertion_order() {
        let mut collector = ErrorCollector::new();
        collector.push(error("New error"));
        collector.push(error("Some formatted error err_text, 1"));
        assert_eq!(collector.len(), 2);

        let joined = collector.into_result(",").unwrap_err();
        assert_eq!(joined.to_string(), "New error,Some formatted error err_text, 1");
        assert_eq!(joined.errors().len(), 2);
    }

    #[test]
    fn record_keeps_values_and_collects_failures() {
        let mut collector = ErrorCollector::new();
        assert_eq!(collector.record(Ok::<_, io::Error>(3)), Some(3));
        assert_eq!(collector.record(Err::<i32, _>(error("boom"))), None);
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn collect_errors_returns_none_for_no_errors() {
        assert!(collect_errors::<io::Error, _>(",", Vec::new()).is_none());

        let joined = collect_errors(",", vec![error("Error 1"), error("Error 2")]).expect("two errors");
        assert_eq!(joined.to_string(), "Error 1,Error 2");
    }
}
