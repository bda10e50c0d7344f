//! Schema definitions and migration runner for SurrealDB.
//!
//! All tables are SCHEMAFULL. UUIDs are stored as strings and enums as
//! strings with ASSERT constraints.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Users
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD name ON TABLE user TYPE string;
DEFINE FIELD role ON TABLE user TYPE string \
    ASSERT $value IN ['customer', 'admin'];
DEFINE FIELD address ON TABLE user TYPE option<string>;
DEFINE FIELD phone ON TABLE user TYPE option<string>;
DEFINE FIELD password_hash ON TABLE user TYPE option<string>;
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;

-- =======================================================================
-- Sessions (created by the external identity provider exchange)
-- =======================================================================
DEFINE TABLE session SCHEMAFULL;
DEFINE FIELD user_id ON TABLE session TYPE string;
DEFINE FIELD token_hash ON TABLE session TYPE string;
DEFINE FIELD expires_at ON TABLE session TYPE datetime;
DEFINE FIELD created_at ON TABLE session TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_session_token ON TABLE session COLUMNS token_hash;
DEFINE INDEX idx_session_user ON TABLE session COLUMNS user_id;

-- =======================================================================
-- Catalog
-- =======================================================================
DEFINE TABLE category SCHEMAFULL;
DEFINE FIELD name ON TABLE category TYPE string;
DEFINE FIELD description ON TABLE category TYPE option<string>;
DEFINE FIELD image ON TABLE category TYPE option<string>;
DEFINE FIELD created_at ON TABLE category TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE category TYPE datetime \
    DEFAULT time::now();

DEFINE TABLE product SCHEMAFULL;
DEFINE FIELD name ON TABLE product TYPE string;
DEFINE FIELD description ON TABLE product TYPE string;
DEFINE FIELD price ON TABLE product TYPE float ASSERT $value >= 0;
DEFINE FIELD category_id ON TABLE product TYPE string;
DEFINE FIELD images ON TABLE product TYPE array<string> DEFAULT [];
DEFINE FIELD sizes ON TABLE product TYPE array<string> DEFAULT [];
DEFINE FIELD colors ON TABLE product TYPE array<string> DEFAULT [];
DEFINE FIELD inventory ON TABLE product TYPE int DEFAULT 0 \
    ASSERT $value >= 0;
DEFINE FIELD featured ON TABLE product TYPE bool DEFAULT false;
DEFINE FIELD created_at ON TABLE product TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE product TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_product_category ON TABLE product COLUMNS category_id;

-- =======================================================================
-- Orders
-- =======================================================================
DEFINE TABLE customer_order SCHEMAFULL;
DEFINE FIELD user_id ON TABLE customer_order TYPE string;
DEFINE FIELD items ON TABLE customer_order TYPE array<object>;
DEFINE FIELD items.*.product_id ON TABLE customer_order TYPE string;
DEFINE FIELD items.*.quantity ON TABLE customer_order TYPE int \
    ASSERT $value >= 1;
DEFINE FIELD items.*.size ON TABLE customer_order TYPE option<string>;
DEFINE FIELD items.*.color ON TABLE customer_order TYPE option<string>;
DEFINE FIELD subtotal ON TABLE customer_order TYPE float;
DEFINE FIELD delivery_charge ON TABLE customer_order TYPE float;
DEFINE FIELD total ON TABLE customer_order TYPE float;
DEFINE FIELD status ON TABLE customer_order TYPE string \
    ASSERT $value IN ['pending', 'confirmed', 'shipped', 'delivered', \
    'cancelled'];
DEFINE FIELD delivery_address ON TABLE customer_order TYPE string;
DEFINE FIELD phone ON TABLE customer_order TYPE string;
DEFINE FIELD delivery_option ON TABLE customer_order TYPE string \
    ASSERT $value IN ['standard', 'express', 'next_day', 'free'];
DEFINE FIELD payment_method ON TABLE customer_order TYPE string \
    DEFAULT 'cod' ASSERT $value IN ['cod'];
DEFINE FIELD created_at ON TABLE customer_order TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE customer_order TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_order_user ON TABLE customer_order COLUMNS user_id;
";

/// Apply every migration newer than the recorded schema version.
///
/// Safe to call on every start-up.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT version FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );
        db.query(migration.sql).await?.check().map_err(|e| {
            DbError::Migration(format!(
                "Migration v{} '{}' failed: {}",
                migration.version, migration.name, e,
            ))
        })?;

        db.query("CREATE _migration SET version = $version, name = $name")
            .bind(("version", migration.version))
            .bind(("name", migration.name.to_string()))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

        info!(version = migration.version, "Migration applied");
    }

    Ok(())
}
