pub(crate) mod command;
pub(crate) mod dispatcher;
pub(crate) mod view;
