pub(crate) mod matcher;
pub(crate) mod preference;
pub(crate) mod signal;
pub(crate) mod slot;
