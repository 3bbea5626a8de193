//! Database configuration module.
//!
//! Handles the `SQLite` connection and creates the `states` and `demands`
//! tables from the entity definitions with `SeaORM`'s
//! `Schema::create_table_from_entity`, so the stored schema always matches the
//! Rust models. Creation is idempotent and runs on every start-up.

use crate::entities::{Demand, State};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::{debug, info, instrument};

/// Establishes a connection to the database at `database_url`.
#[instrument]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Opening database connection");
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates every table that does not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    create_table(db, State).await?;
    create_table(db, Demand).await?;
    info!("Database tables ensured");
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(builder.build(&table)).await?;
    Ok(())
}

/// Opens the database and makes sure the schema is in place.
pub async fn init_db(database_url: &str) -> Result<DatabaseConnection> {
    let db = create_connection(database_url).await?;
    create_tables(&db).await?;
    Ok(db)
}
