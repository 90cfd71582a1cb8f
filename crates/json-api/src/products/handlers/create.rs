//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};

use shelf_app::domain::products::validation::validate_create;

use crate::{
    errors::ApiError,
    extensions::*,
    products::{handlers::CREATED_MESSAGE, models::ProductEnvelope},
    state::State,
};

/// Create Product Handler
///
/// Body: `name`, `description`, `manager`, `password` and optional `status`.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    status_codes(201, 400, 500),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductEnvelope>, ApiError> {
    let new_product = validate_create(&req.json_value().await?)?;

    let product = depot
        .obtain_or_500::<Arc<State>>()?
        .products
        .create_product(new_product)
        .await?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ProductEnvelope::new(CREATED_MESSAGE, product)))
}
