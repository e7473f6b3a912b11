use diesel_migrations::{EmbeddedMigrations, embed_migrations};

pub mod connection;
pub mod enums;
pub mod query;
pub mod schema;

/// Embedded schema migrations, applied out-of-band by the deployment
/// tooling (`diesel migration run` or a migration harness over a sync
/// connection).
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();
