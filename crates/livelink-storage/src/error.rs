use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
  #[error("database connection failed: {0}")]
  Connection(String),

  #[error("migration failed: {0}")]
  Migration(String),

  #[error("query failed: {0}")]
  Query(#[from] diesel::result::Error),

  #[error("unsupported journal mode: {0}")]
  JournalMode(String),

  /// Una fila que no se puede convertir al dominio (uuid o fecha ilegibles).
  #[error("corrupt row in {table}: {reason}")]
  Corrupt { table: &'static str, reason: String },

  #[error("connection mutex poisoned")]
  Poisoned,
}
