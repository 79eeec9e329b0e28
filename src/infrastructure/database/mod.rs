pub mod repositories;

pub use repositories::MongoUsuarioRepository;

use mongodb::{bson::doc, Client, Database};
use tracing::info;

use crate::config::DatabaseConfig;

/// Connect to MongoDB and verify the deployment answers a ping.
pub async fn init_database(config: &DatabaseConfig) -> Result<(Client, Database), mongodb::error::Error> {
    info!("Connecting to database: {}", config.redacted_uri());
    let client = Client::with_uri_str(&config.uri).await?;
    let db = client.database(&config.name);
    db.run_command(doc! { "ping": 1 }).await?;
    info!(database = %config.name, "Database connected successfully");
    Ok((client, db))
}
