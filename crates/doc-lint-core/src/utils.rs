//! Utility functions for rule implementations.

pub mod attributes;
pub mod source;

#[doc(inline)]
pub use attributes::{attribute_name, has_attribute};
#[doc(inline)]
pub use source::offset_for;
