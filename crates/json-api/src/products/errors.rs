//! Product Errors

use tracing::error;

use shelf_app::domain::products::{ProductsServiceError, ValidationError};

use crate::errors::ApiError;

impl From<ProductsServiceError> for ApiError {
    fn from(error: ProductsServiceError) -> Self {
        match error {
            ProductsServiceError::AlreadyExists => ApiError::Duplicate,
            ProductsServiceError::NotFound => ApiError::NotFound,
            ProductsServiceError::Unauthorized => ApiError::Unauthorized,
            ProductsServiceError::InvalidData => {
                ApiError::Validation("product data was rejected by the store".to_owned())
            }
            ProductsServiceError::Sql(source) => {
                error!("product storage failure: {source}");

                ApiError::Internal
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError::Validation(error.into_message())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helpers::sqlx_pool_timeout;

    use super::*;

    #[test]
    fn service_errors_map_to_api_errors() {
        assert_eq!(
            ApiError::from(ProductsServiceError::AlreadyExists),
            ApiError::Duplicate
        );
        assert_eq!(
            ApiError::from(ProductsServiceError::NotFound),
            ApiError::NotFound
        );
        assert_eq!(
            ApiError::from(ProductsServiceError::Unauthorized),
            ApiError::Unauthorized
        );
        assert_eq!(
            ApiError::from(ProductsServiceError::Sql(sqlx_pool_timeout())),
            ApiError::Internal
        );
        assert!(
            matches!(
                ApiError::from(ProductsServiceError::InvalidData),
                ApiError::Validation(_)
            ),
            "store-rejected data is a validation failure"
        );
    }

    #[test]
    fn validation_errors_keep_their_message() {
        assert_eq!(
            ApiError::from(ValidationError::new("name is required")),
            ApiError::Validation("name is required".to_owned())
        );
    }
}
