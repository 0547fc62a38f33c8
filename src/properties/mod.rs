//! Key/value storage behind every configuration object.

mod bag;
mod id;

pub use bag::PropertyBag;
pub use id::{PropertyId, PropertyKey};
