//! The validating decorator around a resolved parameter handler.

use std::any::Any;
use std::sync::Arc;

use serde_json::Value;

use crate::engine::{
    ConstraintRef, ConstraintValidatorFactory, ExecutionContext, Translator,
};
use crate::error::{ResolveError, ValidationFailed};
use crate::params::{Arguments, InputParameterHandler, InputTypeRef, ParameterHandler, ResolveInfo};

/// Wraps an input parameter handler so every resolution passes through
/// constraint evaluation.
///
/// Built once per asserted parameter at schema-construction time by
/// [`AssertParameterMiddleware`](crate::params::AssertParameterMiddleware).
/// The decorator is itself an [`InputParameterHandler`], so it is
/// substitutable anywhere the wrapped handler would be used and composes
/// with further middleware.
///
/// Each `resolve` call is independent: a fresh execution context is created,
/// every constraint runs (a failing constraint never short-circuits later
/// ones), and the accumulated violations are either empty, in which case the
/// value passes through unchanged, or surfaced as one error per violation.
pub struct ParameterValidator {
    parameter: Arc<dyn InputParameterHandler>,
    parameter_name: String,
    constraints: Vec<ConstraintRef>,
    validator_factory: Arc<dyn ConstraintValidatorFactory>,
    translator: Arc<dyn Translator>,
}

impl ParameterValidator {
    /// Wrap `parameter` with the given constraint list.
    pub fn new(
        parameter: Arc<dyn InputParameterHandler>,
        parameter_name: impl Into<String>,
        constraints: Vec<ConstraintRef>,
        validator_factory: Arc<dyn ConstraintValidatorFactory>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self {
            parameter,
            parameter_name: parameter_name.into(),
            constraints,
            validator_factory,
            translator,
        }
    }

    /// The constraints enforced on each resolution, in declaration order.
    pub fn constraints(&self) -> &[ConstraintRef] {
        &self.constraints
    }
}

impl ParameterHandler for ParameterValidator {
    fn resolve(
        &self,
        source: Option<&Value>,
        args: &Arguments,
        context: &dyn Any,
        info: &ResolveInfo,
    ) -> Result<Value, ResolveError> {
        // Coercion and default substitution happen in the wrapped handler,
        // so defaults are validated exactly like client-supplied values.
        let value = self.parameter.resolve(source, args, context, info)?;

        let mut ctx =
            ExecutionContext::new(self.parameter_name.clone(), Arc::clone(&self.translator));

        for constraint in &self.constraints {
            let validator = self.validator_factory.instance(constraint.as_ref());
            ctx.set_constraint(Arc::clone(constraint));
            ctx.set_node(value.clone(), source.cloned(), self.parameter_name.clone());
            validator.validate(&value, constraint.as_ref(), &mut ctx);
        }

        let violations = ctx.into_violations();
        if violations.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                parameter = %self.parameter_name,
                field = %info.field_name,
                constraints = self.constraints.len(),
                "parameter passed validation"
            );
            return Ok(value);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            parameter = %self.parameter_name,
            field = %info.field_name,
            violations = violations.len(),
            "parameter failed validation"
        );

        Err(ValidationFailed::new(violations.into_iter().map(Into::into).collect()).into())
    }
}

impl InputParameterHandler for ParameterValidator {
    fn input_type(&self) -> &InputTypeRef {
        self.parameter.input_type()
    }

    fn default_value(&self) -> Option<&Value> {
        self.parameter.default_value()
    }

    fn has_default_value(&self) -> bool {
        self.parameter.has_default_value()
    }
}
