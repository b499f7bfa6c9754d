pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised by the toolkit.
///
/// An unsatisfiable constraint set is *not* an error: the solver reports
/// exhaustion through the `None` arm of its result, so an empty assignment
/// can never be mistaken for "no solution".
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A value was assigned or inserted outside a variable's native domain.
    /// The offending write fails locally; values are never clamped.
    #[error("value {value} is outside the domain of variable `{variable}`")]
    DomainViolation { variable: String, value: String },

    /// A variable was registered under a name that is already taken.
    #[error("variable name `{name}` is already taken")]
    DuplicateVariable { name: String },

    /// An operation was invoked on a domain variant that does not define it,
    /// e.g. an in-place union on a singleton or enumerating the universe.
    #[error("operation `{operation}` is not supported on a {domain} domain")]
    UnsupportedOperation {
        operation: &'static str,
        domain: &'static str,
    },
}

impl Error {
    pub(crate) fn domain_violation(variable: &str, value: &dyn std::fmt::Debug) -> Self {
        Error::DomainViolation {
            variable: variable.to_string(),
            value: format!("{value:?}"),
        }
    }

    pub(crate) fn unsupported(operation: &'static str, domain: &'static str) -> Self {
        Error::UnsupportedOperation { operation, domain }
    }
}
