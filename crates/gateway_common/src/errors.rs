//! Errors and error specific types for universal use

/// Custom Result
/// A custom datatype that wraps the error variant <E> into a report, allowing
/// error_stack::Report<E> specific extendability
///
/// Effectively, equivalent to `Result<T, error_stack::Report<E>>`
///
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Validation errors raised by the value objects' `validate()` methods.
///
/// Setters and getters never produce these; only an explicit validation call does.
#[allow(missing_docs)] // Only to prevent warnings about struct fields not being documented
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The bank account is missing a required field or carries an unsupported type.
    #[error("{message}")]
    InvalidBankAccount { message: String },

    /// The customer is missing a required field.
    #[error("{message}")]
    InvalidCustomer { message: String },
}
