//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductDeletion, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self
            .repository
            .get_product(&mut tx, product)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(product)
    }

    #[tracing::instrument(
        name = "products.service.create_product",
        skip(self, product),
        fields(product_uuid = tracing::field::Empty),
        err
    )]
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        // Advisory only: the unique constraint on `name` settles races.
        if self
            .repository
            .find_product_by_name(&mut tx, &product.name)
            .await?
            .is_some()
        {
            return Err(ProductsServiceError::AlreadyExists);
        }

        let uuid = ProductUuid::new();

        tracing::Span::current().record("product_uuid", tracing::field::display(uuid));

        let created = self.repository.create_product(&mut tx, uuid, product).await?;

        tx.commit().await?;

        info!(product_uuid = %created.uuid, "created product");

        Ok(created)
    }

    #[tracing::instrument(
        name = "products.service.update_product",
        skip(self, update),
        fields(product_uuid = %product),
        err
    )]
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self
            .repository
            .lock_product(&mut tx, product)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        if !existing.password.matches(&update.password) {
            return Err(ProductsServiceError::Unauthorized);
        }

        if let Some(name) = update.name.as_deref()
            && let Some(holder) = self.repository.find_product_by_name(&mut tx, name).await?
            && holder.uuid != product
        {
            return Err(ProductsServiceError::AlreadyExists);
        }

        let updated = self
            .repository
            .update_product(&mut tx, product, update)
            .await?;

        tx.commit().await?;

        info!("updated product");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "products.service.delete_product",
        skip(self, deletion),
        fields(product_uuid = %product),
        err
    )]
    async fn delete_product(
        &self,
        product: ProductUuid,
        deletion: ProductDeletion,
    ) -> Result<ProductUuid, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self
            .repository
            .lock_product(&mut tx, product)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        if !existing.password.matches(&deletion.password) {
            return Err(ProductsServiceError::Unauthorized);
        }

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        info!("deleted product");

        Ok(product)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products, newest first.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product, rejecting a name that is already taken.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Applies a partial update once the ownership password matches.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Permanently deletes a product once the ownership password matches.
    async fn delete_product(
        &self,
        product: ProductUuid,
        deletion: ProductDeletion,
    ) -> Result<ProductUuid, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::products::records::{Password, ProductStatus},
        test::{TestContext, helpers::new_product},
    };

    use super::*;

    fn update_with(password: &str) -> ProductUpdate {
        ProductUpdate {
            password: Password::new(password),
            name: None,
            description: None,
            manager: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn create_product_returns_stored_fields_with_default_status() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx.products.create_product(new_product("A", "p")).await?;

        assert_eq!(product.name, "A");
        assert_eq!(product.description, "A description");
        assert_eq!(product.manager, "manager");
        assert_eq!(product.status, ProductStatus::ForSale);
        assert_eq!(product.created_at, product.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_duplicate_name_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.products.create_product(new_product("A", "p")).await?;

        let result = ctx.products.create_product(new_product("A", "q")).await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        let products = ctx.products.list_products().await?;

        assert_eq!(products.len(), 1, "duplicate create must not write");

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_duplicate_creates_leave_one_record() -> TestResult {
        let ctx = TestContext::new().await;

        let (first, second) = tokio::join!(
            ctx.products.create_product(new_product("Race", "p")),
            ctx.products.create_product(new_product("Race", "q")),
        );

        let results = [first, second];

        assert_eq!(
            results.iter().filter(|result| result.is_ok()).count(),
            1,
            "exactly one create should win"
        );

        assert!(
            results
                .iter()
                .any(|result| matches!(result, Err(ProductsServiceError::AlreadyExists))),
            "the losing create should report AlreadyExists"
        );

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_renames_to_one_name_leave_one_holder() -> TestResult {
        let ctx = TestContext::new().await;

        let a = ctx.products.create_product(new_product("A", "p")).await?;
        let b = ctx.products.create_product(new_product("B", "p")).await?;

        let rename = |name: &str| ProductUpdate {
            name: Some(name.to_string()),
            ..update_with("p")
        };

        let (first, second) = tokio::join!(
            ctx.products.update_product(a.uuid, rename("Taken")),
            ctx.products.update_product(b.uuid, rename("Taken")),
        );

        let results = [first, second];

        assert_eq!(
            results.iter().filter(|result| result.is_ok()).count(),
            1,
            "exactly one rename should win"
        );

        assert!(
            results
                .iter()
                .any(|result| matches!(result, Err(ProductsServiceError::AlreadyExists))),
            "the losing rename should report AlreadyExists"
        );

        let names: Vec<String> = ctx
            .products
            .list_products()
            .await?
            .into_iter()
            .map(|product| product.name)
            .collect();

        assert_eq!(
            names.iter().filter(|name| name.as_str() == "Taken").count(),
            1,
            "one product holds the name, got {names:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn name_uniqueness_is_case_sensitive() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.products.create_product(new_product("Lamp", "p")).await?;
        ctx.products.create_product(new_product("lamp", "p")).await?;

        assert_eq!(ctx.products.list_products().await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_returns_newest_first() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx.products.create_product(new_product("first", "p")).await?;
        let second = ctx.products.create_product(new_product("second", "p")).await?;
        let third = ctx.products.create_product(new_product("third", "p")).await?;

        let uuids: Vec<ProductUuid> = ctx
            .products
            .list_products()
            .await?
            .into_iter()
            .map(|product| product.uuid)
            .collect();

        assert_eq!(uuids, vec![third.uuid, second.uuid, first.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_empty_when_none_created() -> TestResult {
        let ctx = TestContext::new().await;

        assert!(ctx.products.list_products().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn get_product_returns_created_product() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(new_product("A", "p")).await?;
        let fetched = ctx.products.get_product(created.uuid).await?;

        assert_eq!(fetched, created);

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_status_only_leaves_other_fields_untouched() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(new_product("A", "p")).await?;

        let updated = ctx
            .products
            .update_product(
                created.uuid,
                ProductUpdate {
                    status: Some(ProductStatus::SoldOut),
                    ..update_with("p")
                },
            )
            .await?;

        assert_eq!(updated.status, ProductStatus::SoldOut);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.manager, created.manager);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at, "updated_at should advance");

        Ok(())
    }

    #[tokio::test]
    async fn update_with_wrong_password_returns_unauthorized_and_changes_nothing() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(new_product("A", "p")).await?;

        let result = ctx
            .products
            .update_product(
                created.uuid,
                ProductUpdate {
                    name: Some("B".to_string()),
                    ..update_with("wrong")
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::Unauthorized)),
            "expected Unauthorized, got {result:?}"
        );

        assert_eq!(ctx.products.get_product(created.uuid).await?, created);

        Ok(())
    }

    #[tokio::test]
    async fn update_to_taken_name_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.products.create_product(new_product("A", "p")).await?;
        let b = ctx.products.create_product(new_product("B", "p")).await?;

        let result = ctx
            .products
            .update_product(
                b.uuid,
                ProductUpdate {
                    name: Some("A".to_string()),
                    ..update_with("p")
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_to_own_name_is_not_a_duplicate() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(new_product("A", "p")).await?;

        let updated = ctx
            .products
            .update_product(
                created.uuid,
                ProductUpdate {
                    name: Some("A".to_string()),
                    manager: Some("someone else".to_string()),
                    ..update_with("p")
                },
            )
            .await?;

        assert_eq!(updated.name, "A");
        assert_eq!(updated.manager, "someone else");

        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .update_product(ProductUuid::new(), update_with("p"))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_product_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(new_product("A", "p")).await?;

        let deleted = ctx
            .products
            .delete_product(
                created.uuid,
                ProductDeletion {
                    password: Password::new("p"),
                },
            )
            .await?;

        assert_eq!(deleted, created.uuid);

        let result = ctx.products.get_product(created.uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_with_wrong_password_keeps_the_product() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(new_product("A", "p")).await?;

        let result = ctx
            .products
            .delete_product(
                created.uuid,
                ProductDeletion {
                    password: Password::new("nope"),
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::Unauthorized)),
            "expected Unauthorized, got {result:?}"
        );

        assert_eq!(ctx.products.get_product(created.uuid).await?, created);

        Ok(())
    }

    #[tokio::test]
    async fn deleting_unknown_uuid_twice_returns_not_found_both_times() {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        for _ in 0..2 {
            let result = ctx
                .products
                .delete_product(
                    uuid,
                    ProductDeletion {
                        password: Password::new("p"),
                    },
                )
                .await;

            assert!(
                matches!(result, Err(ProductsServiceError::NotFound)),
                "expected NotFound, got {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn deleted_name_can_be_reused() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(new_product("A", "p")).await?;

        ctx.products
            .delete_product(
                created.uuid,
                ProductDeletion {
                    password: Password::new("p"),
                },
            )
            .await?;

        let recreated = ctx.products.create_product(new_product("A", "q")).await?;

        assert_ne!(recreated.uuid, created.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn store_rejects_status_outside_the_enum() {
        let ctx = TestContext::new().await;

        let result = sqlx::query(
            "INSERT INTO products (uuid, name, description, manager, password, status) \
             VALUES ($1, 'A', 'd', 'm', 'p', 'DISCONTINUED')",
        )
        .bind(ProductUuid::new().into_uuid())
        .execute(ctx.db.pool())
        .await
        .map_err(ProductsServiceError::from);

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }
}
