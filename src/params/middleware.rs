//! The parameter-mapping pipeline run once per handler parameter at
//! schema-build time.
//!
//! The pipeline is a concrete, inspectable list of middlewares applied in
//! order around a base mapper. Each middleware receives the same metadata
//! plus a `next` handle and decides whether to decorate what the rest of
//! the chain produces.

use std::sync::Arc;

use crate::annotations::Assertion;
use crate::error::Result;
use crate::params::{InputTypeRef, ResolvedParameter};

/// Reflective metadata for one handler parameter.
///
/// Supplied once at schema build by the surrounding framework; the method
/// name is carried so configuration errors can point at the offending
/// handler.
#[derive(Debug, Clone)]
pub struct ParameterMeta {
    method: String,
    name: String,
}

impl ParameterMeta {
    /// Describe the parameter `name` of handler `method`.
    pub fn new(method: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            name: name.into(),
        }
    }

    /// The handler method this parameter belongs to.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The declarations attached to one handler parameter.
///
/// Discovery of declarations (attributes, registration-time builders, code
/// generation) is the surrounding framework's job; this is just the
/// per-parameter collection it hands to the pipeline.
#[derive(Default, Clone)]
pub struct ParameterAnnotations {
    assertions: Vec<Assertion>,
}

impl ParameterAnnotations {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select, from a method's full declaration list, the assertions whose
    /// target matches `parameter_name`. Declaration order is preserved.
    pub fn for_parameter(
        parameter_name: &str,
        assertions: impl IntoIterator<Item = Assertion>,
    ) -> Self {
        Self {
            assertions: assertions
                .into_iter()
                .filter(|assertion| assertion.target() == parameter_name)
                .collect(),
        }
    }

    /// Attach an assertion.
    #[must_use]
    pub fn with_assertion(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    /// The attached assertions, in declaration order.
    pub fn assertions(&self) -> &[Assertion] {
        &self.assertions
    }

    /// Whether no declaration is attached.
    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }
}

/// Maps one handler parameter to a [`ResolvedParameter`].
///
/// This is the "next" seam of the chain: the base mapper at the end of the
/// pipeline implements it, and so does every partially-applied tail of the
/// middleware list.
pub trait ParameterMapper: Send + Sync {
    /// Produce the handler for one parameter.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`](crate::error::SchemaError) when the
    /// parameter cannot be mapped; schema construction aborts.
    fn map_parameter(
        &self,
        meta: &ParameterMeta,
        doc_block: Option<&str>,
        declared_type: Option<&InputTypeRef>,
        annotations: &ParameterAnnotations,
    ) -> Result<ResolvedParameter>;
}

/// A build-time decorator around parameter mapping.
///
/// Middlewares must always delegate to `next`, even when they decide not to
/// decorate, so later middlewares and the base mapper still run.
pub trait ParameterMiddleware: Send + Sync {
    /// Map the parameter, optionally decorating what `next` produces.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`](crate::error::SchemaError) on
    /// configuration mistakes; schema construction aborts.
    fn map_parameter(
        &self,
        meta: &ParameterMeta,
        doc_block: Option<&str>,
        declared_type: Option<&InputTypeRef>,
        annotations: &ParameterAnnotations,
        next: &dyn ParameterMapper,
    ) -> Result<ResolvedParameter>;
}

/// An ordered middleware list applied around a base mapper.
///
/// Middlewares run in the order they were added: the first added is the
/// outermost decorator. The list is concrete and inspectable after build.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use graphql_assert::engine::IdentityTranslator;
/// use graphql_assert::params::{AssertParameterMiddleware, ParameterMappingPipeline};
/// # use graphql_assert::engine::ConstraintValidatorFactory;
/// # fn base_mapper() -> Arc<dyn graphql_assert::params::ParameterMapper> { unimplemented!() }
/// # fn factory() -> Arc<dyn ConstraintValidatorFactory> { unimplemented!() }
///
/// let pipeline = ParameterMappingPipeline::new(base_mapper())
///     .with_middleware(Arc::new(AssertParameterMiddleware::new(
///         factory(),
///         Arc::new(IdentityTranslator),
///     )));
/// ```
pub struct ParameterMappingPipeline {
    middlewares: Vec<Arc<dyn ParameterMiddleware>>,
    base: Arc<dyn ParameterMapper>,
}

impl ParameterMappingPipeline {
    /// Create a pipeline that terminates at `base`.
    pub fn new(base: Arc<dyn ParameterMapper>) -> Self {
        Self {
            middlewares: Vec::new(),
            base,
        }
    }

    /// Append a middleware; earlier additions sit outermost.
    #[must_use]
    pub fn with_middleware(mut self, middleware: Arc<dyn ParameterMiddleware>) -> Self {
        self.middlewares.push(middleware);
        self
    }

    /// The middleware list, outermost first.
    pub fn middlewares(&self) -> &[Arc<dyn ParameterMiddleware>] {
        &self.middlewares
    }
}

impl ParameterMapper for ParameterMappingPipeline {
    fn map_parameter(
        &self,
        meta: &ParameterMeta,
        doc_block: Option<&str>,
        declared_type: Option<&InputTypeRef>,
        annotations: &ParameterAnnotations,
    ) -> Result<ResolvedParameter> {
        ChainTail {
            rest: &self.middlewares,
            base: self.base.as_ref(),
        }
        .map_parameter(meta, doc_block, declared_type, annotations)
    }
}

/// The not-yet-applied tail of a pipeline, itself a mapper.
struct ChainTail<'a> {
    rest: &'a [Arc<dyn ParameterMiddleware>],
    base: &'a dyn ParameterMapper,
}

impl ParameterMapper for ChainTail<'_> {
    fn map_parameter(
        &self,
        meta: &ParameterMeta,
        doc_block: Option<&str>,
        declared_type: Option<&InputTypeRef>,
        annotations: &ParameterAnnotations,
    ) -> Result<ResolvedParameter> {
        match self.rest.split_first() {
            Some((head, rest)) => head.map_parameter(
                meta,
                doc_block,
                declared_type,
                annotations,
                &ChainTail { rest, base: self.base },
            ),
            None => self.base.map_parameter(meta, doc_block, declared_type, annotations),
        }
    }
}
