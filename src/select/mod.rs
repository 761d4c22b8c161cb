pub(crate) mod sections;
