//! Delete Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use shelf_app::domain::products::validation::validate_delete;

use crate::{
    errors::ApiError,
    extensions::*,
    products::{
        handlers::DELETED_MESSAGE,
        models::{DeletedProduct, ProductDeletedEnvelope, parse_product_uuid},
    },
    state::State,
};

/// Delete Product Handler
///
/// Requires the ownership `password`. Other body fields are ignored.
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    status_codes(200, 400, 401, 404, 500),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductDeletedEnvelope>, ApiError> {
    let uuid = parse_product_uuid(&id.into_inner())?;
    let deletion = validate_delete(&req.json_value().await?)?;

    let deleted = depot
        .obtain_or_500::<Arc<State>>()?
        .products
        .delete_product(uuid, deletion)
        .await?;

    Ok(Json(ProductDeletedEnvelope {
        message: DELETED_MESSAGE.to_owned(),
        data: DeletedProduct {
            id: deleted.into_uuid(),
        },
    }))
}
