//! Apertura de la conexión, pragmas y migraciones embebidas.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::StorageError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub const IN_MEMORY: &str = ":memory:";

const JOURNAL_MODES: &[&str] = &["DELETE", "TRUNCATE", "PERSIST", "MEMORY", "WAL", "OFF"];

/// Abre la base, activa las foreign keys (sin ellas no hay cascadas) y aplica
/// las migraciones pendientes.
pub fn initialize_database(database_url: &str, journal_mode: Option<&str>) -> Result<SqliteConnection, StorageError> {
  info!(database_url, "initializing SQLite database");

  let mut conn =
    SqliteConnection::establish(database_url).map_err(|e| StorageError::Connection(e.to_string()))?;

  // PRAGMA no tiene DSL en diesel.
  diesel::sql_query("PRAGMA foreign_keys = ON").execute(&mut conn)?;

  if let Some(mode) = journal_mode
    && database_url != IN_MEMORY
  {
    set_journal_mode(&mut conn, mode)?;
  }

  let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| StorageError::Migration(e.to_string()))?;
  debug!(count = applied.len(), "migrations applied");

  Ok(conn)
}

fn set_journal_mode(conn: &mut SqliteConnection, mode: &str) -> Result<(), StorageError> {
  let mode = mode.trim().to_ascii_uppercase();
  // Se interpola en SQL: sólo valores conocidos.
  if !JOURNAL_MODES.contains(&mode.as_str()) {
    return Err(StorageError::JournalMode(mode));
  }

  diesel::sql_query(format!("PRAGMA journal_mode = {mode}")).execute(conn)?;
  debug!(%mode, "journal mode set");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use diesel::sql_types::Integer;
  use tempfile::tempdir;

  #[derive(QueryableByName)]
  struct PragmaRow {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
  }

  #[test]
  fn foreign_keys_are_enforced() {
    let mut conn = initialize_database(IN_MEMORY, None).unwrap();

    let row = diesel::sql_query("PRAGMA foreign_keys").get_result::<PragmaRow>(&mut conn).unwrap();

    assert_eq!(row.foreign_keys, 1);
  }

  #[test]
  fn file_database_accepts_wal() {
    let tmp = tempdir().unwrap();
    let url = tmp.path().join("livelink.db");

    assert!(initialize_database(url.to_str().unwrap(), Some("wal")).is_ok());
  }

  #[test]
  fn unknown_journal_mode_is_rejected() {
    let tmp = tempdir().unwrap();
    let url = tmp.path().join("livelink.db");

    let err = initialize_database(url.to_str().unwrap(), Some("wal; DROP TABLE songs"))
      .err()
      .expect("journal mode should be rejected");

    assert!(matches!(err, StorageError::JournalMode(_)));
  }
}
