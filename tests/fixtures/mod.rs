//! Shared test fixtures: a small constraint engine and a base parameter
//! mapper, standing in for the pluggable collaborators a real schema
//! framework would supply.

// Not every test binary uses every fixture.
#![allow(dead_code)]

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use graphql_assert::engine::{
    Constraint, ConstraintValidator, ConstraintValidatorFactory, ExecutionContext,
};
use graphql_assert::error::{ConstraintViolationError, ResolveError, Result};
use graphql_assert::params::{
    ArgumentParameter, Arguments, InputParameterHandler, InputTypeRef, ParameterAnnotations,
    ParameterHandler, ParameterMapper, ParameterMeta, ResolveInfo, ResolvedParameter,
};

/// "Must be a valid email address" rule.
pub struct Email;

impl Constraint for Email {
    fn name(&self) -> &str {
        "Email"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// "Must be at least `min` characters" rule.
pub struct Length {
    pub min: usize,
}

impl Constraint for Length {
    fn name(&self) -> &str {
        "Length"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct EmailValidator;

impl ConstraintValidator for EmailValidator {
    fn validate(&self, value: &Value, _constraint: &dyn Constraint, ctx: &mut ExecutionContext) {
        let Some(s) = value.as_str() else {
            return;
        };

        if !looks_like_email(s) {
            ctx.build_violation("This value is not a valid email address.")
                .code("invalid_email")
                .add();
        }
    }
}

fn looks_like_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

struct LengthValidator;

impl ConstraintValidator for LengthValidator {
    fn validate(&self, value: &Value, constraint: &dyn Constraint, ctx: &mut ExecutionContext) {
        let min = constraint
            .as_any()
            .downcast_ref::<Length>()
            .expect("LengthValidator requires a Length constraint")
            .min;

        if let Some(s) = value.as_str()
            && s.chars().count() < min
        {
            ctx.build_violation(
                "This value is too short. It should have {{ limit }} characters or more.",
            )
            .param("{{ limit }}", min.to_string())
            .code("too_short")
            .add();
        }
    }
}

/// Dispatches each fixture constraint to its validator.
pub struct FixtureValidatorFactory;

impl ConstraintValidatorFactory for FixtureValidatorFactory {
    fn instance(&self, constraint: &dyn Constraint) -> Box<dyn ConstraintValidator> {
        if constraint.as_any().is::<Email>() {
            Box::new(EmailValidator)
        } else if constraint.as_any().is::<Length>() {
            Box::new(LengthValidator)
        } else {
            panic!("no validator registered for constraint {:?}", constraint.name())
        }
    }
}

/// A framework-injected parameter, not derived from client input.
struct InjectedInfoParameter;

impl ParameterHandler for InjectedInfoParameter {
    fn resolve(
        &self,
        _source: Option<&Value>,
        _args: &Arguments,
        _context: &dyn Any,
        info: &ResolveInfo,
    ) -> std::result::Result<Value, ResolveError> {
        Ok(Value::String(info.field_name.clone()))
    }
}

/// Base mapper standing in for the schema framework's own parameter mapping.
///
/// Parameters named `resolve_info` become framework-injected handlers;
/// everything else reads the same-named client argument, with an optional
/// configured default.
#[derive(Default)]
pub struct FixtureMapper {
    defaults: HashMap<String, Value>,
}

impl FixtureMapper {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_default(mut self, parameter: &str, value: Value) -> Self {
        self.defaults.insert(parameter.to_string(), value);
        self
    }
}

impl ParameterMapper for FixtureMapper {
    fn map_parameter(
        &self,
        meta: &ParameterMeta,
        _doc_block: Option<&str>,
        declared_type: Option<&InputTypeRef>,
        _annotations: &ParameterAnnotations,
    ) -> Result<ResolvedParameter> {
        if meta.name() == "resolve_info" {
            return Ok(ResolvedParameter::Injected(Arc::new(InjectedInfoParameter)));
        }

        let ty = declared_type.cloned().unwrap_or(InputTypeRef::named("String"));
        let mut handler = ArgumentParameter::new(meta.name(), ty);
        if let Some(default) = self.defaults.get(meta.name()) {
            handler = handler.with_default(default.clone());
        }

        let handler: Arc<dyn InputParameterHandler> = Arc::new(handler);
        Ok(ResolvedParameter::Input(handler))
    }
}

/// Resolve every parameter of one field the way a query executor would,
/// aggregating all violations into a single error list instead of stopping
/// at the first invalid parameter.
pub fn execute_field(
    parameters: &[(&str, ResolvedParameter)],
    args: &Arguments,
    info: &ResolveInfo,
) -> std::result::Result<HashMap<String, Value>, Vec<ConstraintViolationError>> {
    let mut values = HashMap::new();
    let mut errors = Vec::new();

    for (name, parameter) in parameters {
        match parameter.resolve(None, args, &(), info) {
            Ok(value) => {
                values.insert((*name).to_string(), value);
            }
            Err(ResolveError::Validation(failed)) => errors.extend(failed.into_violations()),
            Err(other) => panic!("unexpected resolution failure for {name}: {other}"),
        }
    }

    if errors.is_empty() { Ok(values) } else { Err(errors) }
}
