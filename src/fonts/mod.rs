pub(crate) mod catalog;
pub(crate) mod inventory;
pub(crate) mod resolver;
