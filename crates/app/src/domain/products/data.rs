//! Products Data

use crate::domain::products::records::{Password, ProductStatus};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub manager: String,
    pub password: Password,
    pub status: ProductStatus,
}

/// Product Update Data
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub password: Password,
    pub name: Option<String>,
    pub description: Option<String>,
    pub manager: Option<String>,
    pub status: Option<ProductStatus>,
}

/// Product Deletion Data
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDeletion {
    pub password: Password,
}
