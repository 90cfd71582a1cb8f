//! Product Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    errors::ApiError,
    extensions::*,
    products::{
        handlers::LISTED_MESSAGE,
        models::{ProductListEnvelope, ProductResponse},
    },
    state::State,
};

/// Product Index Handler
///
/// Returns every product, newest first.
#[endpoint(tags("products"), summary = "List Products", status_codes(200, 500))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductListEnvelope>, ApiError> {
    let products = depot
        .obtain_or_500::<Arc<State>>()?
        .products
        .list_products()
        .await?;

    Ok(Json(ProductListEnvelope {
        message: LISTED_MESSAGE.to_owned(),
        data: products.into_iter().map(ProductResponse::from).collect(),
    }))
}
