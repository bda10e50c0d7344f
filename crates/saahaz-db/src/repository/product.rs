//! SurrealDB implementation of [`ProductRepository`].

use chrono::{DateTime, Utc};
use saahaz_core::error::SaahazResult;
use saahaz_core::models::product::{CreateProduct, Product, ProductFilter, UpdateProduct};
use saahaz_core::repository::ProductRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::{DbError, parse_uuid};

#[derive(Debug, SurrealValue)]
struct ProductRow {
    name: String,
    description: String,
    price: f64,
    category_id: String,
    images: Vec<String>,
    sizes: Vec<String>,
    colors: Vec<String>,
    inventory: u32,
    featured: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct ProductRowWithId {
    record_id: String,
    name: String,
    description: String,
    price: f64,
    category_id: String,
    images: Vec<String>,
    sizes: Vec<String>,
    colors: Vec<String>,
    inventory: u32,
    featured: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self, id: Uuid) -> Result<Product, DbError> {
        Ok(Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category_id: parse_uuid(&self.category_id, "category")?,
            images: self.images,
            sizes: self.sizes,
            colors: self.colors,
            inventory: self.inventory,
            featured: self.featured,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl ProductRowWithId {
    fn try_into_product(self) -> Result<Product, DbError> {
        Ok(Product {
            id: parse_uuid(&self.record_id, "product")?,
            name: self.name,
            description: self.description,
            price: self.price,
            category_id: parse_uuid(&self.category_id, "category")?,
            images: self.images,
            sizes: self.sizes,
            colors: self.colors,
            inventory: self.inventory,
            featured: self.featured,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the Product repository.
#[derive(Clone)]
pub struct SurrealProductRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealProductRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ProductRepository for SurrealProductRepository<C> {
    async fn create(&self, input: CreateProduct) -> SaahazResult<Product> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('product', $id) SET \
                 name = $name, description = $description, \
                 price = $price, category_id = $category_id, \
                 images = $images, sizes = $sizes, colors = $colors, \
                 inventory = $inventory, featured = $featured",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("description", input.description))
            .bind(("price", input.price))
            .bind(("category_id", input.category_id.to_string()))
            .bind(("images", input.images))
            .bind(("sizes", input.sizes))
            .bind(("colors", input.colors))
            .bind(("inventory", input.inventory))
            .bind(("featured", input.featured))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<ProductRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "product".into(),
            id: id_str,
        })?;

        Ok(row.into_product(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> SaahazResult<Product> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('product', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProductRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "product".into(),
            id: id_str,
        })?;

        Ok(row.into_product(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> SaahazResult<Product> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }
        if input.price.is_some() {
            sets.push("price = $price");
        }
        if input.category_id.is_some() {
            sets.push("category_id = $category_id");
        }
        if input.images.is_some() {
            sets.push("images = $images");
        }
        if input.sizes.is_some() {
            sets.push("sizes = $sizes");
        }
        if input.colors.is_some() {
            sets.push("colors = $colors");
        }
        if input.inventory.is_some() {
            sets.push("inventory = $inventory");
        }
        if input.featured.is_some() {
            sets.push("featured = $featured");
        }
        sets.push("updated_at = time::now()");

        // UPDATE on a missing record id returns nothing, never creates.
        let query = format!(
            "UPDATE type::record('product', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));
        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }
        if let Some(price) = input.price {
            builder = builder.bind(("price", price));
        }
        if let Some(category_id) = input.category_id {
            builder = builder.bind(("category_id", category_id.to_string()));
        }
        if let Some(images) = input.images {
            builder = builder.bind(("images", images));
        }
        if let Some(sizes) = input.sizes {
            builder = builder.bind(("sizes", sizes));
        }
        if let Some(colors) = input.colors {
            builder = builder.bind(("colors", colors));
        }
        if let Some(inventory) = input.inventory {
            builder = builder.bind(("inventory", inventory));
        }
        if let Some(featured) = input.featured {
            builder = builder.bind(("featured", featured));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<ProductRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "product".into(),
            id: id_str,
        })?;

        Ok(row.into_product(id)?)
    }

    async fn delete(&self, id: Uuid) -> SaahazResult<()> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("DELETE type::record('product', $id) RETURN BEFORE")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let removed: Vec<ProductRow> = result.take(0).map_err(DbError::from)?;
        if removed.is_empty() {
            return Err(DbError::NotFound {
                entity: "product".into(),
                id: id_str,
            }
            .into());
        }

        Ok(())
    }

    async fn list(&self, filter: ProductFilter) -> SaahazResult<Vec<Product>> {
        let mut conditions = Vec::new();
        if filter.category_id.is_some() {
            conditions.push("category_id = $category_id");
        }
        if filter.featured.is_some() {
            conditions.push("featured = $featured");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM product{where_clause} \
             ORDER BY created_at ASC"
        );

        let mut builder = self.db.query(&query);
        if let Some(category_id) = filter.category_id {
            builder = builder.bind(("category_id", category_id.to_string()));
        }
        if let Some(featured) = filter.featured {
            builder = builder.bind(("featured", featured));
        }

        let mut result = builder.await.map_err(DbError::from)?;
        let rows: Vec<ProductRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_product())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(items)
    }
}
