//! Per-resolution execution context accumulating violations.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::engine::{ConstraintRef, Translator};

/// The result of one failed constraint evaluation.
///
/// Transient: produced inside a single resolution call and immediately
/// translated into a [`ConstraintViolationError`](crate::error::ConstraintViolationError).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Violation {
    /// Human-readable, already-translated message.
    pub message: String,
    /// Machine-readable error code, if the rule supplies one.
    pub code: Option<String>,
    /// Dot/bracket path into the argument structure.
    pub path: Option<String>,
}

/// Per-call scratch state shared by all validators of one resolution.
///
/// A fresh context is created for every `resolve` call and bound to the
/// parameter under validation; contexts are never shared across calls or
/// requests. Validators append violations through [`build_violation`];
/// the accumulated list comes out via [`into_violations`] after all
/// constraints have run.
///
/// [`build_violation`]: ExecutionContext::build_violation
/// [`into_violations`]: ExecutionContext::into_violations
pub struct ExecutionContext {
    root: String,
    translator: Arc<dyn Translator>,
    constraint: Option<ConstraintRef>,
    value: Value,
    object: Option<Value>,
    property_path: String,
    violations: Vec<Violation>,
}

impl ExecutionContext {
    /// Create a context rooted at `root` (the parameter name).
    pub fn new(root: impl Into<String>, translator: Arc<dyn Translator>) -> Self {
        let root = root.into();
        Self {
            property_path: root.clone(),
            root,
            translator,
            constraint: None,
            value: Value::Null,
            object: None,
            violations: Vec::new(),
        }
    }

    /// Set the constraint currently being evaluated.
    pub fn set_constraint(&mut self, constraint: ConstraintRef) {
        self.constraint = Some(constraint);
    }

    /// Bind the node under validation: the resolved value, the source object
    /// the field is being resolved on (so validators can run cross-field
    /// checks), and the path at which violations should be reported.
    pub fn set_node(
        &mut self,
        value: Value,
        object: Option<Value>,
        property_path: impl Into<String>,
    ) {
        self.value = value;
        self.object = object;
        self.property_path = property_path.into();
    }

    /// The path root this context was created with.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The value currently bound as the node under validation.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The source object the field is resolved on, when one exists.
    pub fn object(&self) -> Option<&Value> {
        self.object.as_ref()
    }

    /// The constraint currently being evaluated, if any.
    pub fn constraint(&self) -> Option<&ConstraintRef> {
        self.constraint.as_ref()
    }

    /// Start building a violation from a message template.
    ///
    /// The violation is not recorded until [`ViolationBuilder::add`] is
    /// called.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use graphql_assert::engine::{ExecutionContext, IdentityTranslator};
    ///
    /// let mut ctx = ExecutionContext::new("email", Arc::new(IdentityTranslator));
    /// ctx.build_violation("This value is not a valid email address.")
    ///     .code("invalid_email")
    ///     .add();
    /// assert_eq!(ctx.violations().len(), 1);
    /// ```
    pub fn build_violation(&mut self, template: impl Into<String>) -> ViolationBuilder<'_> {
        ViolationBuilder {
            template: template.into(),
            params: HashMap::new(),
            code: None,
            sub_path: None,
            ctx: self,
        }
    }

    /// The violations recorded so far, in recording order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consume the context, yielding the accumulated violation list.
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

/// Fluent builder for a single [`Violation`].
///
/// Mirrors the shape validators expect from a constraint engine: message
/// template plus named parameters, an optional machine code, and an optional
/// sub-path appended to the context's property path.
pub struct ViolationBuilder<'ctx> {
    template: String,
    params: HashMap<String, String>,
    code: Option<String>,
    sub_path: Option<String>,
    ctx: &'ctx mut ExecutionContext,
}

impl ViolationBuilder<'_> {
    /// Add a named message parameter, substituted by the translator.
    #[must_use]
    pub fn param(mut self, placeholder: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(placeholder.into(), value.into());
        self
    }

    /// Attach a machine-readable error code.
    #[must_use]
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Report the violation at a sub-path below the bound property path,
    /// e.g. `"street"` for a violation inside a nested input object.
    #[must_use]
    pub fn at_path(mut self, sub_path: impl Into<String>) -> Self {
        self.sub_path = Some(sub_path.into());
        self
    }

    /// Translate the message and record the violation on the context.
    pub fn add(self) {
        let message = self.ctx.translator.translate(&self.template, &self.params);

        let path = match &self.sub_path {
            Some(sub) if self.ctx.property_path.is_empty() => sub.clone(),
            Some(sub) => format!("{}.{sub}", self.ctx.property_path),
            None => self.ctx.property_path.clone(),
        };

        self.ctx.violations.push(Violation {
            message,
            code: self.code,
            path: (!path.is_empty()).then_some(path),
        });
    }
}
