//! Update Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use shelf_app::domain::products::validation::validate_update;

use crate::{
    errors::ApiError,
    extensions::*,
    products::{
        handlers::UPDATED_MESSAGE,
        models::{ProductEnvelope, parse_product_uuid},
    },
    state::State,
};

/// Product Update Handler
///
/// Requires the ownership `password`. Absent fields are left unchanged.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    status_codes(200, 400, 401, 404, 500),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductEnvelope>, ApiError> {
    let uuid = parse_product_uuid(&id.into_inner())?;
    let update = validate_update(&req.json_value().await?)?;

    let product = depot
        .obtain_or_500::<Arc<State>>()?
        .products
        .update_product(uuid, update)
        .await?;

    Ok(Json(ProductEnvelope::new(UPDATED_MESSAGE, product)))
}
