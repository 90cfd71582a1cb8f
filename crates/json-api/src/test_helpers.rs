//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, catcher::Catcher, prelude::*, test::ResponseExt};
use serde_json::Value;

use shelf_app::domain::products::MockProductsService;

use crate::{errors::json_fallback, state::State};

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    Arc::new(State::new(Arc::new(products)))
}

/// Serve `route` with the given mock behind it, rendering errors as JSON.
pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_products(products)))
            .push(route),
    )
    .catcher(Catcher::default().hoop(json_fallback))
}

/// A mock that fails the test if any service method is called.
pub(crate) fn untouched_products() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

pub(crate) async fn take_value(res: &mut Response) -> Result<Value, salvo::Error> {
    res.take_json::<Value>().await
}

pub(crate) fn sqlx_pool_timeout() -> sqlx::Error {
    sqlx::Error::PoolTimedOut
}
