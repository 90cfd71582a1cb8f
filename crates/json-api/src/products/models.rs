//! Product wire models.

use std::str::FromStr;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shelf_app::domain::products::records::{ProductRecord, ProductUuid};

use crate::errors::ApiError;

/// A product as clients see it. The ownership password is never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub id: Uuid,

    /// Unique product name
    pub name: String,

    pub description: String,

    /// Who manages the product
    pub manager: String,

    /// `FOR_SALE` or `SOLD_OUT`
    pub status: String,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            id: product.uuid.into_uuid(),
            name: product.name,
            description: product.description,
            manager: product.manager,
            status: product.status.to_string(),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// `{ message, data: product }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductEnvelope {
    pub message: String,
    pub data: ProductResponse,
}

impl ProductEnvelope {
    pub(crate) fn new(message: &str, product: ProductRecord) -> Self {
        Self {
            message: message.to_owned(),
            data: product.into(),
        }
    }
}

/// `{ message, data: [product] }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductListEnvelope {
    pub message: String,
    pub data: Vec<ProductResponse>,
}

/// Identifier of a deleted product.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeletedProduct {
    pub id: Uuid,
}

/// `{ message, data: { id } }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductDeletedEnvelope {
    pub message: String,
    pub data: DeletedProduct,
}

/// Ids that are not UUIDs cannot name a stored product.
pub(crate) fn parse_product_uuid(id: &str) -> Result<ProductUuid, ApiError> {
    ProductUuid::from_str(id).map_err(|_malformed| ApiError::NotFound)
}
