pub(crate) mod resolution;
