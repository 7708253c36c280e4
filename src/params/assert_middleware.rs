//! The middleware that turns assertion declarations into validating
//! decorators.

use std::sync::Arc;

use crate::engine::{ConstraintRef, ConstraintValidatorFactory, Translator};
use crate::error::{Result, SchemaError};
use crate::params::{
    InputTypeRef, ParameterAnnotations, ParameterMapper, ParameterMeta, ParameterMiddleware,
    ParameterValidator, ResolvedParameter,
};

/// Parameter middleware that reads [`Assertion`](crate::annotations::Assertion)
/// declarations.
///
/// Runs once per handler parameter during schema construction. Parameters
/// without assertions pass through untouched; parameters with assertions get
/// wrapped in a [`ParameterValidator`] that enforces every declared
/// constraint at request time.
///
/// Declaring an assertion on a parameter that is not part of the client
/// input (a framework-injected value such as resolve info) is a
/// configuration mistake and fails schema construction.
pub struct AssertParameterMiddleware {
    validator_factory: Arc<dyn ConstraintValidatorFactory>,
    translator: Arc<dyn Translator>,
}

impl AssertParameterMiddleware {
    /// Create the middleware with the engine seams it hands to every
    /// decorator it builds.
    pub fn new(
        validator_factory: Arc<dyn ConstraintValidatorFactory>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self {
            validator_factory,
            translator,
        }
    }
}

impl ParameterMiddleware for AssertParameterMiddleware {
    fn map_parameter(
        &self,
        meta: &ParameterMeta,
        doc_block: Option<&str>,
        declared_type: Option<&InputTypeRef>,
        annotations: &ParameterAnnotations,
        next: &dyn ParameterMapper,
    ) -> Result<ResolvedParameter> {
        // Delegate unconditionally; later middleware and the base mapper
        // must run even when nothing is declared here.
        let parameter = next.map_parameter(meta, doc_block, declared_type, annotations)?;

        let assertions = annotations.assertions();
        if assertions.is_empty() {
            return Ok(parameter);
        }

        let Some(handler) = parameter.as_input() else {
            return Err(SchemaError::CannotValidateParameter {
                method: meta.method().to_string(),
                parameter: meta.name().to_string(),
            });
        };

        // Merge by concatenation, declaration order preserved, duplicates
        // kept.
        let constraints: Vec<ConstraintRef> = assertions
            .iter()
            .flat_map(|assertion| assertion.constraints().iter().cloned())
            .collect();

        Ok(ResolvedParameter::Input(Arc::new(ParameterValidator::new(
            Arc::clone(handler),
            meta.name(),
            constraints,
            Arc::clone(&self.validator_factory),
            Arc::clone(&self.translator),
        ))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::Assertion;
    use crate::engine::{Constraint, ConstraintValidator, ExecutionContext, IdentityTranslator};
    use crate::params::{ArgumentParameter, InputParameterHandler, ParameterHandler};
    use serde_json::Value;
    use std::any::Any;

    struct Stub;

    impl Constraint for Stub {
        fn name(&self) -> &str {
            "Stub"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct PassValidator;

    impl ConstraintValidator for PassValidator {
        fn validate(&self, _value: &Value, _constraint: &dyn Constraint, _ctx: &mut ExecutionContext) {}
    }

    struct StubFactory;

    impl ConstraintValidatorFactory for StubFactory {
        fn instance(&self, _constraint: &dyn Constraint) -> Box<dyn ConstraintValidator> {
            Box::new(PassValidator)
        }
    }

    /// Counts how many validator instances were requested.
    struct CountingFactory {
        instances: std::sync::atomic::AtomicUsize,
    }

    impl ConstraintValidatorFactory for CountingFactory {
        fn instance(&self, _constraint: &dyn Constraint) -> Box<dyn ConstraintValidator> {
            self.instances.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            Box::new(PassValidator)
        }
    }

    struct InputMapper;

    impl ParameterMapper for InputMapper {
        fn map_parameter(
            &self,
            meta: &ParameterMeta,
            _doc_block: Option<&str>,
            _declared_type: Option<&InputTypeRef>,
            _annotations: &ParameterAnnotations,
        ) -> Result<ResolvedParameter> {
            let handler: Arc<dyn InputParameterHandler> = Arc::new(ArgumentParameter::new(
                meta.name(),
                InputTypeRef::named("String"),
            ));
            Ok(ResolvedParameter::Input(handler))
        }
    }

    /// Maps every parameter as framework-injected.
    struct InjectedMapper;

    struct NullHandler;

    impl ParameterHandler for NullHandler {
        fn resolve(
            &self,
            _source: Option<&Value>,
            _args: &crate::params::Arguments,
            _context: &dyn Any,
            _info: &crate::params::ResolveInfo,
        ) -> std::result::Result<Value, crate::error::ResolveError> {
            Ok(Value::Null)
        }
    }

    impl ParameterMapper for InjectedMapper {
        fn map_parameter(
            &self,
            _meta: &ParameterMeta,
            _doc_block: Option<&str>,
            _declared_type: Option<&InputTypeRef>,
            _annotations: &ParameterAnnotations,
        ) -> Result<ResolvedParameter> {
            Ok(ResolvedParameter::Injected(Arc::new(NullHandler)))
        }
    }

    fn middleware() -> AssertParameterMiddleware {
        AssertParameterMiddleware::new(Arc::new(StubFactory), Arc::new(IdentityTranslator))
    }

    fn assertion(constraint_count: usize) -> Assertion {
        let mut builder = Assertion::builder().target("$email");
        for _ in 0..constraint_count {
            builder = builder.constraint(Arc::new(Stub));
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_no_assertions_returns_base_handler_unchanged() {
        let meta = ParameterMeta::new("UserController::find", "email");
        let annotations = ParameterAnnotations::new();

        let base = InputMapper.map_parameter(&meta, None, None, &annotations).unwrap();
        let base_handler = Arc::clone(base.as_input().unwrap());

        // Run through a chain that reproduces the same base handler.
        struct FixedMapper(ResolvedParameter);
        impl ParameterMapper for FixedMapper {
            fn map_parameter(
                &self,
                _meta: &ParameterMeta,
                _doc_block: Option<&str>,
                _declared_type: Option<&InputTypeRef>,
                _annotations: &ParameterAnnotations,
            ) -> Result<ResolvedParameter> {
                Ok(self.0.clone())
            }
        }

        let mapped = middleware()
            .map_parameter(&meta, None, None, &annotations, &FixedMapper(base))
            .unwrap();

        // Object identity preserved: same Arc, no wrapping.
        let mapped_handler = mapped.as_input().unwrap();
        assert!(Arc::ptr_eq(&base_handler, mapped_handler));
    }

    #[test]
    fn test_assertion_on_injected_parameter_fails_at_build_time() {
        let meta = ParameterMeta::new("InvalidController::invalid", "resolve_info");
        let annotations = ParameterAnnotations::new().with_assertion(
            Assertion::builder()
                .target("$resolve_info")
                .constraint(Arc::new(Stub))
                .build()
                .unwrap(),
        );

        let err = middleware()
            .map_parameter(&meta, None, None, &annotations, &InjectedMapper)
            .unwrap_err();

        match err {
            SchemaError::CannotValidateParameter { method, parameter } => {
                assert_eq!(method, "InvalidController::invalid");
                assert_eq!(parameter, "resolve_info");
            }
            other => panic!("expected CannotValidateParameter, got: {other}"),
        }
    }

    #[test]
    fn test_multiple_assertions_merge_by_concatenation() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let meta = ParameterMeta::new("UserController::create", "email");
        let annotations = ParameterAnnotations::new()
            .with_assertion(assertion(2))
            .with_assertion(assertion(1))
            .with_assertion(assertion(3));

        let factory = Arc::new(CountingFactory { instances: AtomicUsize::new(0) });
        let middleware =
            AssertParameterMiddleware::new(factory.clone(), Arc::new(IdentityTranslator));

        let mapped = middleware
            .map_parameter(&meta, None, None, &annotations, &InputMapper)
            .unwrap();

        // One validator instance per merged constraint: 2 + 1 + 3.
        let mut args = crate::params::Arguments::new();
        args.insert("email".to_string(), Value::String("a@a.com".to_string()));
        mapped
            .resolve(None, &args, &(), &crate::params::ResolveInfo::new("createUser"))
            .unwrap();
        assert_eq!(factory.instances.load(Ordering::Relaxed), 6);
    }

    #[test]
    fn test_decoration_preserves_declared_shape() {
        let meta = ParameterMeta::new("UserController::create", "email");
        let annotations = ParameterAnnotations::new().with_assertion(assertion(1));

        let mapped = middleware()
            .map_parameter(&meta, None, None, &annotations, &InputMapper)
            .unwrap();

        let handler = mapped.as_input().unwrap();
        assert_eq!(handler.input_type(), &InputTypeRef::named("String"));
        assert!(!handler.has_default_value());
    }
}
