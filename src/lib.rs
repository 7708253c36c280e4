//! # graphql-assert
//!
//! Declarative parameter validation middleware for GraphQL schema pipelines.
//!
//! ## Overview
//!
//! `graphql-assert` lets a query/mutation handler declare validation
//! constraints for its parameters ("must be a valid email", "minimum length
//! 8") that are enforced automatically before the handler body executes.
//! Violations surface as structured, client-safe GraphQL errors carrying a
//! field path and a machine-readable code.
//!
//! The crate adapts a pluggable constraint-validation engine into one
//! extension point of the schema-construction pipeline; it performs no
//! validation logic of its own beyond dispatch and result translation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use graphql_assert::annotations::Assertion;
//! use graphql_assert::engine::IdentityTranslator;
//! use graphql_assert::prelude::*;
//!
//! # fn engine_factory() -> Arc<dyn graphql_assert::engine::ConstraintValidatorFactory> {
//! #     unimplemented!()
//! # }
//! # fn email_constraint() -> graphql_assert::engine::ConstraintRef { unimplemented!() }
//! # fn base_mapper() -> Arc<dyn ParameterMapper> { unimplemented!() }
//! # fn example() -> graphql_assert::error::Result<()> {
//! // At schema-construction time, install the middleware...
//! let pipeline = ParameterMappingPipeline::new(base_mapper())
//!     .with_middleware(Arc::new(AssertParameterMiddleware::new(
//!         engine_factory(),
//!         Arc::new(IdentityTranslator),
//!     )));
//!
//! // ...and declare constraints for a handler parameter.
//! let assertion = Assertion::builder()
//!     .target("$email")
//!     .constraint(email_constraint())
//!     .build()?;
//!
//! let annotations = ParameterAnnotations::new().with_assertion(assertion);
//! let meta = ParameterMeta::new("UserController::findByMail", "email");
//! let _parameter = pipeline.map_parameter(&meta, None, None, &annotations)?;
//! # Ok(())
//! # }
//! ```
//!
//! At request time, resolving the mapped parameter runs every declared
//! constraint against the resolved value; a value that passes comes back
//! unchanged, and every violation becomes its own
//! [`ConstraintViolationError`](error::ConstraintViolationError) with
//! category `"Validate"` in the response's `errors` array.
//!
//! ## Design
//!
//! - **Build-time wiring, request-time enforcement**: the middleware runs
//!   once per parameter while the schema is built; unannotated parameters
//!   pass through with zero overhead.
//! - **Configuration errors fail fast**: missing assertion targets or
//!   constraints, and assertions on framework-injected parameters, abort
//!   schema construction before any traffic is served.
//! - **Pluggable engine**: rule evaluation, message translation, and
//!   declaration discovery stay behind the traits in [`engine`].

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod annotations;
pub mod engine;
pub mod error;
pub mod params;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::annotations::Assertion;
    pub use crate::error::{
        ConstraintViolationError, GraphQlError, ResolveError, Result, SchemaError,
        ValidationFailed,
    };
    pub use crate::params::{
        AssertParameterMiddleware, InputParameterHandler, ParameterAnnotations, ParameterHandler,
        ParameterMapper, ParameterMappingPipeline, ParameterMeta, ParameterMiddleware,
        ResolvedParameter,
    };
}
