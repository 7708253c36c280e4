//! Interfaces to the pluggable constraint-validation engine.
//!
//! The core performs no validation logic of its own; it dispatches to an
//! engine supplied by the application through these seams and translates
//! the resulting violations into GraphQL errors.

mod constraint;
mod context;
mod translator;

pub use constraint::{Constraint, ConstraintRef, ConstraintValidator, ConstraintValidatorFactory};
pub use context::{ExecutionContext, Violation, ViolationBuilder};
pub use translator::{IdentityTranslator, Translator};
