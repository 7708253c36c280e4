//! Shared request-time types: arguments, type references, resolve info.

use std::fmt;

use serde_json::{Map, Value};

/// The raw client-supplied arguments of one field, keyed by argument name.
pub type Arguments = Map<String, Value>;

/// A reference to a GraphQL input type.
///
/// # Examples
///
/// ```rust
/// use graphql_assert::params::InputTypeRef;
///
/// let ty = InputTypeRef::non_null(InputTypeRef::named("String"));
/// assert_eq!(ty.to_string(), "String!");
/// assert!(ty.is_non_null());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputTypeRef {
    /// A named type, e.g. `String` or `UserInput`.
    Named(String),
    /// A list wrapping an inner type, e.g. `[String]`.
    List(Box<InputTypeRef>),
    /// A non-null wrapper, e.g. `String!`.
    NonNull(Box<InputTypeRef>),
}

impl InputTypeRef {
    /// A named type reference.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// A list of `inner`.
    pub fn list(inner: InputTypeRef) -> Self {
        Self::List(Box::new(inner))
    }

    /// A non-null `inner`.
    pub fn non_null(inner: InputTypeRef) -> Self {
        Self::NonNull(Box::new(inner))
    }

    /// Whether the outermost wrapper rejects null.
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }
}

impl fmt::Display for InputTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

/// Field-resolution metadata handed through to parameter handlers.
///
/// A minimal descriptor of where in the query the resolution is happening;
/// the query executor owns the full picture.
#[derive(Debug, Clone)]
pub struct ResolveInfo {
    /// Name of the field being resolved.
    pub field_name: String,
    /// Response path from the operation root to this field.
    pub path: Vec<String>,
}

impl ResolveInfo {
    /// Describe resolution of a root field.
    pub fn new(field_name: impl Into<String>) -> Self {
        let field_name = field_name.into();
        Self {
            path: vec![field_name.clone()],
            field_name,
        }
    }
}
