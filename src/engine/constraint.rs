//! Constraint descriptor and validator traits.

use std::any::Any;
use std::sync::Arc;

use serde_json::Value;

use crate::engine::ExecutionContext;

/// A shared, read-only constraint descriptor.
///
/// Descriptors are built once at schema-construction time and shared across
/// arbitrarily many concurrent requests.
pub type ConstraintRef = Arc<dyn Constraint>;

/// An opaque validation rule plus its configuration.
///
/// The core never interprets a constraint; it only hands it to the
/// [`ConstraintValidatorFactory`] and back to the validator the factory
/// returns. Concrete engines downcast through [`Constraint::as_any`] to
/// recover their own descriptor types.
///
/// # Examples
///
/// ```rust
/// use std::any::Any;
/// use graphql_assert::engine::Constraint;
///
/// struct MinLength {
///     min: usize,
/// }
///
/// impl Constraint for MinLength {
///     fn name(&self) -> &str {
///         "MinLength"
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
/// ```
pub trait Constraint: Send + Sync {
    /// A short human-readable rule name (for logging and diagnostics).
    fn name(&self) -> &str;

    /// Access to the concrete descriptor for factory downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// An executable validator bound to one constraint rule.
///
/// Validators run synchronously against a single value and report failures
/// by appending violations to the [`ExecutionContext`]. Returning without
/// appending anything means the value passed.
pub trait ConstraintValidator {
    /// Evaluate `value` against `constraint`.
    ///
    /// Implementations should build violations through
    /// [`ExecutionContext::build_violation`], which handles message
    /// translation and field-path resolution.
    fn validate(&self, value: &Value, constraint: &dyn Constraint, ctx: &mut ExecutionContext);
}

/// Produces validator instances for constraint descriptors.
///
/// This is the seam to the pluggable rule engine: the core asks the factory
/// for a fresh executable validator once per constraint per resolution call.
pub trait ConstraintValidatorFactory: Send + Sync {
    /// Return a validator able to evaluate `constraint`.
    fn instance(&self, constraint: &dyn Constraint) -> Box<dyn ConstraintValidator>;
}
