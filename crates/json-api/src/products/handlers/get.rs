//! Get Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    errors::ApiError,
    extensions::*,
    products::{
        handlers::RETRIEVED_MESSAGE,
        models::{ProductEnvelope, parse_product_uuid},
    },
    state::State,
};

/// Get Product Handler
#[endpoint(tags("products"), summary = "Get Product", status_codes(200, 404, 500))]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductEnvelope>, ApiError> {
    let uuid = parse_product_uuid(&id.into_inner())?;

    let product = depot
        .obtain_or_500::<Arc<State>>()?
        .products
        .get_product(uuid)
        .await?;

    Ok(Json(ProductEnvelope::new(RETRIEVED_MESSAGE, product)))
}
