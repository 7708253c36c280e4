//! Declarations attached to handler parameters at schema-build time.

mod assertion;

pub use assertion::{Assertion, AssertionBuilder};
