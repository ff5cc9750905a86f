pub(crate) mod builder;
pub(crate) mod defaults;
pub(crate) mod model;
