//! Error types for graphql-assert.
//!
//! Two disjoint error classes exist:
//!
//! - [`SchemaError`]: configuration mistakes by the API author, raised while
//!   the schema is being built. Fatal, never deferred to request time.
//! - [`ResolveError`] / [`ValidationFailed`]: request-time failures. A
//!   [`ConstraintViolationError`] is expected, client-safe, and correctable
//!   by the caller.

use serde_json::{Map, Value};

use crate::engine::Violation;

/// Result type alias for schema-construction operations.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Errors raised while the schema is being built.
///
/// These are programming mistakes by the API author. They surface during
/// schema validation, before any traffic is served, and are not recoverable.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// An assertion was declared without a target parameter.
    #[error(
        "An assertion must be given a target. For instance: \
         `Assertion::builder().target(\"$email\").constraint(email).build()`"
    )]
    MissingAssertionTarget,

    /// An assertion was declared without any constraint.
    #[error(
        "An assertion must be given one or many constraints. For instance: \
         `Assertion::builder().target(\"$email\").constraint(email).build()`"
    )]
    MissingAssertionConstraint,

    /// An assertion targets a parameter that is not part of the client input.
    #[error(
        "In method {method}(), an assertion is targeting parameter \"${parameter}\". \
         You cannot target this parameter because it is not part of the GraphQL \
         input type. You can only assert parameters coming from the end user."
    )]
    CannotValidateParameter {
        /// Name of the handler method the parameter belongs to.
        method: String,
        /// Name of the offending parameter.
        parameter: String,
    },

    /// A parameter could not be mapped to a handler by the base mapper.
    #[error("Failed to map parameter \"{parameter}\": {reason}")]
    ParameterMapping {
        /// Name of the parameter being mapped.
        parameter: String,
        /// Why mapping failed.
        reason: String,
    },
}

/// Errors raised while resolving a parameter value at request time.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// One or more constraints rejected the resolved value.
    #[error(transparent)]
    Validation(#[from] ValidationFailed),

    /// The raw client argument could not be coerced to the declared type.
    #[error("Failed to coerce argument \"{argument}\": {reason}")]
    Coercion {
        /// Name of the argument being coerced.
        argument: String,
        /// Why coercion failed.
        reason: String,
    },

    /// A required argument was not supplied and no default exists.
    #[error("Missing required argument \"{argument}\"")]
    MissingArgument {
        /// Name of the missing argument.
        argument: String,
    },
}

/// Aggregate of the violations produced by one `resolve` call.
///
/// Carries one [`ConstraintViolationError`] per violation, in constraint
/// declaration order then violation order within a constraint. The executor
/// layer fans these out into the response's `errors` array, so N violations
/// always become N surfaced errors.
#[derive(Debug, thiserror::Error)]
#[error("Input validation failed with {} violation(s)", .violations.len())]
pub struct ValidationFailed {
    violations: Vec<ConstraintViolationError>,
}

impl ValidationFailed {
    /// Wrap an ordered list of violations. Callers must pass at least one;
    /// an empty list means validation succeeded and no error should exist.
    pub(crate) fn new(violations: Vec<ConstraintViolationError>) -> Self {
        debug_assert!(!violations.is_empty());
        Self { violations }
    }

    /// The individual violations, in the order they were recorded.
    pub fn violations(&self) -> &[ConstraintViolationError] {
        &self.violations
    }

    /// Consume the aggregate, yielding each violation as its own error.
    pub fn into_violations(self) -> Vec<ConstraintViolationError> {
        self.violations
    }
}

/// A single constraint violation, surfaced as a GraphQL error.
///
/// Unlike internal errors, the message and extensions here are safe to show
/// to API clients.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ConstraintViolationError {
    message: String,
    code: Option<String>,
    path: Option<String>,
}

impl ConstraintViolationError {
    /// The dot/bracket path into the argument structure, if the rule
    /// supplied one.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// The machine-readable error code, if the rule supplied one.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

impl From<Violation> for ConstraintViolationError {
    fn from(violation: Violation) -> Self {
        Self {
            message: violation.message,
            code: violation.code,
            path: violation.path,
        }
    }
}

/// Errors that the surrounding GraphQL layer knows how to serialize into the
/// response's `errors` array.
pub trait GraphQlError: std::error::Error {
    /// A category string identifying the error's origin.
    ///
    /// The value `"graphql"` is reserved for errors produced by query
    /// parsing or validation; implementations must not use it.
    fn category(&self) -> &'static str;

    /// The `extensions` object attached to the GraphQL error.
    fn extensions(&self) -> Map<String, Value> {
        Map::new()
    }

    /// The HTTP status the transport should hint when this error is the
    /// only outcome of the request.
    fn http_status(&self) -> u16 {
        500
    }

    /// Whether the message and extensions may be shown to clients verbatim.
    fn is_client_safe(&self) -> bool {
        false
    }
}

impl GraphQlError for ConstraintViolationError {
    fn category(&self) -> &'static str {
        "Validate"
    }

    fn extensions(&self) -> Map<String, Value> {
        let mut extensions = Map::new();

        if let Some(code) = &self.code
            && !code.is_empty()
        {
            extensions.insert("code".to_string(), Value::String(code.clone()));
        }

        if let Some(path) = &self.path
            && !path.is_empty()
        {
            extensions.insert("field".to_string(), Value::String(path.clone()));
        }

        extensions
    }

    fn http_status(&self) -> u16 {
        400
    }

    fn is_client_safe(&self) -> bool {
        true
    }
}
