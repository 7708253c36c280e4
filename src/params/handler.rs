//! Parameter handler abstractions and the stock argument handler.

use std::any::Any;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ResolveError;
use crate::params::{Arguments, InputTypeRef, ResolveInfo};

/// Produces a usable value for one handler parameter per request.
///
/// Handlers are created once per schema and reused across requests; they
/// hold no per-request state.
pub trait ParameterHandler: Send + Sync {
    /// Resolve this parameter's value for one field resolution.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] when the value cannot be produced or,
    /// for validating decorators, when constraints reject it.
    fn resolve(
        &self,
        source: Option<&Value>,
        args: &Arguments,
        context: &dyn Any,
        info: &ResolveInfo,
    ) -> Result<Value, ResolveError>;
}

/// A parameter whose value derives from client-supplied input.
///
/// Only these handlers may be targeted by assertions: they know their
/// GraphQL input type and default, and everything they produce traces back
/// to the request's arguments.
pub trait InputParameterHandler: ParameterHandler {
    /// The GraphQL input type of this parameter.
    fn input_type(&self) -> &InputTypeRef;

    /// The default substituted when the client omits the argument.
    fn default_value(&self) -> Option<&Value>;

    /// Whether a default exists.
    fn has_default_value(&self) -> bool {
        self.default_value().is_some()
    }
}

/// The outcome of mapping one handler parameter at schema-build time.
///
/// The variant is the capability tag: middleware that needs client-input
/// semantics (such as validation) pattern-matches on it instead of
/// inspecting concrete types.
#[derive(Clone)]
pub enum ResolvedParameter {
    /// The parameter's value comes from end-user input and can be validated.
    Input(Arc<dyn InputParameterHandler>),
    /// The parameter is injected by the framework (e.g. resolve info or the
    /// request context) and is not part of the client-facing input.
    Injected(Arc<dyn ParameterHandler>),
}

impl core::fmt::Debug for ResolvedParameter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Input(_) => f.write_str("Input(..)"),
            Self::Injected(_) => f.write_str("Injected(..)"),
        }
    }
}

impl ResolvedParameter {
    /// Resolve the parameter's value, whichever variant it is.
    ///
    /// # Errors
    ///
    /// Propagates the underlying handler's [`ResolveError`].
    pub fn resolve(
        &self,
        source: Option<&Value>,
        args: &Arguments,
        context: &dyn Any,
        info: &ResolveInfo,
    ) -> Result<Value, ResolveError> {
        match self {
            Self::Input(handler) => handler.resolve(source, args, context, info),
            Self::Injected(handler) => handler.resolve(source, args, context, info),
        }
    }

    /// The input-capable handler, if this parameter has one.
    pub fn as_input(&self) -> Option<&Arc<dyn InputParameterHandler>> {
        match self {
            Self::Input(handler) => Some(handler),
            Self::Injected(_) => None,
        }
    }

    /// Whether this parameter derives from client input.
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }
}

/// Stock input handler reading a named argument from the client arguments.
///
/// Substitutes the configured default when the argument is omitted and
/// shape-checks the value against the declared type. This is the plain
/// building block that validating decorators wrap.
///
/// # Examples
///
/// ```rust
/// use serde_json::{Map, json};
/// use graphql_assert::params::{ArgumentParameter, InputTypeRef, ParameterHandler, ResolveInfo};
///
/// let email = ArgumentParameter::new("email", InputTypeRef::named("String"))
///     .with_default(json!("a@a.com"));
///
/// let info = ResolveInfo::new("findByMail");
/// let value = email.resolve(None, &Map::new(), &(), &info).unwrap();
/// assert_eq!(value, json!("a@a.com"));
/// ```
pub struct ArgumentParameter {
    name: String,
    input_type: InputTypeRef,
    default: Option<Value>,
}

impl ArgumentParameter {
    /// Create a handler for the argument `name` of the given type.
    pub fn new(name: impl Into<String>, input_type: InputTypeRef) -> Self {
        Self {
            name: name.into(),
            input_type,
            default: None,
        }
    }

    /// Set the default used when the client omits the argument.
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// The argument name this handler reads.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ParameterHandler for ArgumentParameter {
    fn resolve(
        &self,
        _source: Option<&Value>,
        args: &Arguments,
        _context: &dyn Any,
        _info: &ResolveInfo,
    ) -> Result<Value, ResolveError> {
        let value = match args.get(&self.name) {
            Some(value) => value.clone(),
            None => match &self.default {
                Some(default) => default.clone(),
                None if self.input_type.is_non_null() => {
                    return Err(ResolveError::MissingArgument {
                        argument: self.name.clone(),
                    });
                }
                None => Value::Null,
            },
        };

        check_shape(&value, &self.input_type).map_err(|reason| ResolveError::Coercion {
            argument: self.name.clone(),
            reason,
        })?;

        Ok(value)
    }
}

impl InputParameterHandler for ArgumentParameter {
    fn input_type(&self) -> &InputTypeRef {
        &self.input_type
    }

    fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// Shape-check a JSON value against a declared input type.
///
/// Built-in scalars are checked by JSON kind; other named types (input
/// objects, custom scalars, enums) are the schema engine's concern and pass
/// through unchecked.
fn check_shape(value: &Value, ty: &InputTypeRef) -> Result<(), String> {
    match ty {
        InputTypeRef::NonNull(inner) => {
            if value.is_null() {
                Err(format!("non-null type {ty} received null"))
            } else {
                check_shape(value, inner)
            }
        }
        InputTypeRef::List(inner) => match value {
            Value::Null => Ok(()),
            Value::Array(items) => items.iter().try_for_each(|item| check_shape(item, inner)),
            other => Err(format!("expected a list, got {}", json_kind(other))),
        },
        InputTypeRef::Named(name) => {
            if value.is_null() {
                return Ok(());
            }
            let ok = match name.as_str() {
                "String" | "ID" => value.is_string(),
                "Int" => value.as_i64().is_some(),
                "Float" => value.is_number(),
                "Boolean" => value.is_boolean(),
                _ => true,
            };
            if ok {
                Ok(())
            } else {
                Err(format!("expected {name}, got {}", json_kind(value)))
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
