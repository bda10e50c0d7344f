//! SurrealDB implementation of [`CategoryRepository`].

use chrono::{DateTime, Utc};
use saahaz_core::error::SaahazResult;
use saahaz_core::models::category::{Category, CreateCategory, UpdateCategory};
use saahaz_core::repository::CategoryRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::{DbError, parse_uuid};

#[derive(Debug, SurrealValue)]
struct CategoryRow {
    name: String,
    description: Option<String>,
    image: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct CategoryRowWithId {
    record_id: String,
    name: String,
    description: Option<String>,
    image: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CategoryRow {
    fn into_category(self, id: Uuid) -> Category {
        Category {
            id,
            name: self.name,
            description: self.description,
            image: self.image,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl CategoryRowWithId {
    fn try_into_category(self) -> Result<Category, DbError> {
        Ok(Category {
            id: parse_uuid(&self.record_id, "category")?,
            name: self.name,
            description: self.description,
            image: self.image,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the Category repository.
#[derive(Clone)]
pub struct SurrealCategoryRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCategoryRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> CategoryRepository for SurrealCategoryRepository<C> {
    async fn create(&self, input: CreateCategory) -> SaahazResult<Category> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('category', $id) SET \
                 name = $name, description = $description, image = $image",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("description", input.description))
            .bind(("image", input.image))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<CategoryRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "category".into(),
            id: id_str,
        })?;

        Ok(row.into_category(id))
    }

    async fn get_by_id(&self, id: Uuid) -> SaahazResult<Category> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('category', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CategoryRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "category".into(),
            id: id_str,
        })?;

        Ok(row.into_category(id))
    }

    async fn update(&self, id: Uuid, input: UpdateCategory) -> SaahazResult<Category> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }
        if input.image.is_some() {
            sets.push("image = $image");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('category', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));
        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }
        if let Some(image) = input.image {
            builder = builder.bind(("image", image));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<CategoryRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "category".into(),
            id: id_str,
        })?;

        Ok(row.into_category(id))
    }

    async fn delete(&self, id: Uuid) -> SaahazResult<()> {
        // Products keep their category_id; the reference is soft.
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("DELETE type::record('category', $id) RETURN BEFORE")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let removed: Vec<CategoryRow> = result.take(0).map_err(DbError::from)?;
        if removed.is_empty() {
            return Err(DbError::NotFound {
                entity: "category".into(),
                id: id_str,
            }
            .into());
        }

        Ok(())
    }

    async fn list(&self) -> SaahazResult<Vec<Category>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM category ORDER BY created_at ASC")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CategoryRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_category())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(items)
    }
}
