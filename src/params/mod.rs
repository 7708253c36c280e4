//! Parameter mapping, handlers, and the validation middleware.

mod assert_middleware;
mod handler;
mod middleware;
mod types;
mod validator;

pub use assert_middleware::AssertParameterMiddleware;
pub use handler::{ArgumentParameter, InputParameterHandler, ParameterHandler, ResolvedParameter};
pub use middleware::{
    ParameterAnnotations, ParameterMapper, ParameterMappingPipeline, ParameterMeta,
    ParameterMiddleware,
};
pub use types::{Arguments, InputTypeRef, ResolveInfo};
pub use validator::ParameterValidator;
