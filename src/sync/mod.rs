pub(crate) mod surface;
pub(crate) mod synchronizer;
