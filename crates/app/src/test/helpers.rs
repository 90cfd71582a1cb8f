//! Test Helpers

use crate::domain::products::{
    data::NewProduct,
    records::{Password, ProductStatus},
};

pub(crate) fn new_product(name: &str, password: &str) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: format!("{name} description"),
        manager: "manager".to_string(),
        password: Password::new(password),
        status: ProductStatus::default(),
    }
}
