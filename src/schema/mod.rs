pub(crate) mod block;
pub(crate) mod catalog;
pub(crate) mod rule;
mod standard;
