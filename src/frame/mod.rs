pub(crate) mod catalog;
pub(crate) mod engine;
pub(crate) mod transform;
