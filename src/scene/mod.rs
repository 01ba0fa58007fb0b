pub(crate) mod model;
pub(crate) mod overlay;
pub(crate) mod section;
