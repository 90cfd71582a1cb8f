//! Product Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

pub(crate) const CREATED_MESSAGE: &str = "Product created successfully.";
pub(crate) const LISTED_MESSAGE: &str = "Products retrieved successfully.";
pub(crate) const RETRIEVED_MESSAGE: &str = "Product retrieved successfully.";
pub(crate) const UPDATED_MESSAGE: &str = "Product updated successfully.";
pub(crate) const DELETED_MESSAGE: &str = "Product deleted successfully.";
