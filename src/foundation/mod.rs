pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod media;
pub(crate) mod opts;
