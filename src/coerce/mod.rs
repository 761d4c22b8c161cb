pub(crate) mod content;
pub(crate) mod engine;
pub(crate) mod numeric;
mod budget;
mod cardinality;
mod shape;
mod value;
