//! Catalog service: public browsing and admin-only maintenance of
//! categories and products.

use saahaz_auth::access::require_admin;
use saahaz_core::error::{SaahazError, SaahazResult};
use saahaz_core::models::category::{Category, CreateCategory, UpdateCategory};
use saahaz_core::models::identity::Identity;
use saahaz_core::models::product::{CreateProduct, Product, ProductFilter, UpdateProduct};
use saahaz_core::repository::{CategoryRepository, ProductRepository};
use tracing::info;
use uuid::Uuid;

fn check_name(name: &str) -> SaahazResult<()> {
    if name.trim().is_empty() {
        return Err(SaahazError::validation("name must not be empty"));
    }
    Ok(())
}

fn check_price(price: f64) -> SaahazResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(SaahazError::validation("price must be a non-negative number"));
    }
    Ok(())
}

pub struct CatalogService<C: CategoryRepository, P: ProductRepository> {
    category_repo: C,
    product_repo: P,
}

impl<C: CategoryRepository, P: ProductRepository> CatalogService<C, P> {
    pub fn new(category_repo: C, product_repo: P) -> Self {
        Self {
            category_repo,
            product_repo,
        }
    }

    // -------------------------------------------------------------------
    // Categories
    // -------------------------------------------------------------------

    pub async fn list_categories(&self) -> SaahazResult<Vec<Category>> {
        self.category_repo.list().await
    }

    pub async fn get_category(&self, id: Uuid) -> SaahazResult<Category> {
        self.category_repo.get_by_id(id).await
    }

    pub async fn create_category(
        &self,
        identity: &Identity,
        input: CreateCategory,
    ) -> SaahazResult<Category> {
        require_admin(identity)?;
        check_name(&input.name)?;
        let category = self.category_repo.create(input).await?;
        info!(category_id = %category.id, actor = %identity.user_id(), "Category created");
        Ok(category)
    }

    pub async fn update_category(
        &self,
        identity: &Identity,
        id: Uuid,
        input: UpdateCategory,
    ) -> SaahazResult<Category> {
        require_admin(identity)?;
        if let Some(name) = input.name.as_deref() {
            check_name(name)?;
        }
        self.category_repo.update(id, input).await
    }

    /// Products in the category are left in place.
    pub async fn delete_category(&self, identity: &Identity, id: Uuid) -> SaahazResult<()> {
        require_admin(identity)?;
        self.category_repo.delete(id).await?;
        info!(category_id = %id, actor = %identity.user_id(), "Category deleted");
        Ok(())
    }

    // -------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------

    pub async fn list_products(&self, filter: ProductFilter) -> SaahazResult<Vec<Product>> {
        self.product_repo.list(filter).await
    }

    pub async fn get_product(&self, id: Uuid) -> SaahazResult<Product> {
        self.product_repo
            .get_by_id(id)
            .await
            .map_err(|e| match e {
                SaahazError::NotFound { .. } => SaahazError::ProductNotFound { id: id.to_string() },
                other => other,
            })
    }

    pub async fn create_product(
        &self,
        identity: &Identity,
        input: CreateProduct,
    ) -> SaahazResult<Product> {
        require_admin(identity)?;
        check_name(&input.name)?;
        check_price(input.price)?;
        let product = self.product_repo.create(input).await?;
        info!(product_id = %product.id, actor = %identity.user_id(), "Product created");
        Ok(product)
    }

    pub async fn update_product(
        &self,
        identity: &Identity,
        id: Uuid,
        input: UpdateProduct,
    ) -> SaahazResult<Product> {
        require_admin(identity)?;
        if let Some(name) = input.name.as_deref() {
            check_name(name)?;
        }
        if let Some(price) = input.price {
            check_price(price)?;
        }
        self.product_repo.update(id, input).await
    }

    pub async fn delete_product(&self, identity: &Identity, id: Uuid) -> SaahazResult<()> {
        require_admin(identity)?;
        self.product_repo.delete(id).await?;
        info!(product_id = %id, actor = %identity.user_id(), "Product deleted");
        Ok(())
    }
}
