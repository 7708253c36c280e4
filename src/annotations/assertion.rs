//! The assertion declaration attached to a handler parameter.

use crate::engine::ConstraintRef;
use crate::error::{Result, SchemaError};

/// Declares validation constraints for one query/mutation parameter.
///
/// Built once at schema-construction time and immutable thereafter. The
/// target accepts either the bare parameter name or the `$name` spelling
/// used in handler signatures; the leading sigil is stripped.
///
/// # Examples
///
/// ```rust
/// use std::any::Any;
/// use std::sync::Arc;
/// use graphql_assert::annotations::Assertion;
/// use graphql_assert::engine::Constraint;
///
/// struct Email;
///
/// impl Constraint for Email {
///     fn name(&self) -> &str {
///         "Email"
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// # fn example() -> graphql_assert::error::Result<()> {
/// let assertion = Assertion::builder()
///     .target("$email")
///     .constraint(Arc::new(Email))
///     .build()?;
///
/// assert_eq!(assertion.target(), "email");
/// assert_eq!(assertion.constraints().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Assertion {
    target: String,
    constraints: Vec<ConstraintRef>,
}

impl Assertion {
    /// Start building an assertion.
    pub fn builder() -> AssertionBuilder {
        AssertionBuilder::new()
    }

    /// The parameter this assertion applies to, sigil stripped.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The declared constraints, in declaration order.
    pub fn constraints(&self) -> &[ConstraintRef] {
        &self.constraints
    }
}

/// Builder for [`Assertion`].
///
/// Both a target and at least one constraint are required; [`build`] fails
/// with a [`SchemaError`] otherwise, never partially constructing.
///
/// [`build`]: AssertionBuilder::build
#[derive(Default)]
pub struct AssertionBuilder {
    target: Option<String>,
    constraints: Vec<ConstraintRef>,
}

impl AssertionBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the parameter to validate (`"email"` or `"$email"`).
    #[must_use]
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Append a single constraint descriptor.
    #[must_use]
    pub fn constraint(mut self, constraint: ConstraintRef) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Append a sequence of constraint descriptors, order preserved.
    #[must_use]
    pub fn constraints(mut self, constraints: impl IntoIterator<Item = ConstraintRef>) -> Self {
        self.constraints.extend(constraints);
        self
    }

    /// Build the assertion.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::MissingAssertionTarget`] when no target was given.
    /// - [`SchemaError::MissingAssertionConstraint`] when no constraint was
    ///   given.
    pub fn build(self) -> Result<Assertion> {
        let target = self.target.ok_or(SchemaError::MissingAssertionTarget)?;

        if self.constraints.is_empty() {
            return Err(SchemaError::MissingAssertionConstraint);
        }

        Ok(Assertion {
            target: target.trim_start_matches('$').to_string(),
            constraints: self.constraints,
        })
    }
}
