use crate::error::{DatabaseError, DatabaseErrorExt};
use fxhash::FxHashMap;
use sha2::{Digest, Sha256};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use surrealdb::types::SurrealValue;

/// Schema scripts in the order they must be applied.
const BUILTIN: &[(&str, &str)] = &[
    ("0001_core", include_str!("../migrations/0001_core.surql")),
    ("0002_sessions", include_str!("../migrations/0002_sessions.surql")),
];

#[derive(Debug, Clone)]
pub(crate) struct Migration {
    pub version: &'static str,
    pub script: &'static str,
    pub checksum: String,
}

impl Migration {
    pub(crate) fn new(version: &'static str, script: &'static str) -> Self {
        Self { version, script, checksum: hex::encode(Sha256::digest(script.as_bytes())) }
    }
}

pub(crate) fn builtin_migrations() -> Vec<Migration> {
    BUILTIN.iter().map(|(version, script)| Migration::new(version, script)).collect()
}

#[derive(Debug, Default)]
pub(crate) struct MigrationReport {
    pub applied: Vec<String>,
    pub skipped: Vec<String>,
}

#[derive(Debug, SurrealValue)]
struct AppliedMigration {
    version: String,
    checksum: String,
}

#[derive(Debug)]
pub(crate) struct MigrationRunner {
    db: Surreal<Any>,
    migrations: Vec<Migration>,
}

impl MigrationRunner {
    pub(crate) fn new(db: Surreal<Any>) -> Self {
        Self::with_migrations(db, builtin_migrations())
    }

    pub(crate) const fn with_migrations(db: Surreal<Any>, migrations: Vec<Migration>) -> Self {
        Self { db, migrations }
    }

    pub(crate) async fn run(&self) -> Result<MigrationReport, DatabaseError> {
        let mut report = MigrationReport::default();
        let applied = self.applied_migrations().await?;

        for migration in &self.migrations {
            if let Some(existing) = applied.get(migration.version) {
                ensure_checksum_match(migration, existing)?;
                report.skipped.push(migration.version.to_owned());
                continue;
            }

            self.apply(migration).await?;
            report.applied.push(migration.version.to_owned());
        }

        Ok(report)
    }

    async fn apply(&self, migration: &Migration) -> Result<(), DatabaseError> {
        let query = format!(
            "BEGIN TRANSACTION;
            {}
            CREATE migration CONTENT {{ version: $version, checksum: $checksum, applied_at: time::now() }} RETURN NONE;
            COMMIT TRANSACTION;",
            migration.script,
        );

        self.db
            .query(query)
            .bind(("version", migration.version.to_owned()))
            .bind(("checksum", migration.checksum.clone()))
            .await
            .context(format!("Applying migration {}", migration.version))?
            .check()
            .map_err(|e| DatabaseError::Migration {
                message: e.to_string().into(),
                context: Some(format!("Migration {} failed", migration.version).into()),
            })?;

        Ok(())
    }

    async fn applied_migrations(&self) -> Result<FxHashMap<String, String>, DatabaseError> {
        let entries = self
            .db
            .query("DEFINE TABLE IF NOT EXISTS migration SCHEMALESS")
            .query("SELECT version, checksum FROM migration")
            .await
            .context("Loading applied migrations")?
            .take::<Vec<AppliedMigration>>(1)
            .context("Parsing applied migrations")?;

        Ok(entries.into_iter().map(|entry| (entry.version, entry.checksum)).collect())
    }
}

fn ensure_checksum_match(migration: &Migration, existing: &str) -> Result<(), DatabaseError> {
    if existing != migration.checksum {
        return Err(DatabaseError::Migration {
            message: format!(
                "Checksum mismatch for {} (recorded {existing}, embedded {})",
                migration.version, migration.checksum
            )
            .into(),
            context: Some("Migration already applied with different contents".into()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use surrealdb::engine::any::connect;

    async fn memory() -> Surreal<Any> {
        let db = connect("mem://").await.unwrap();
        db.use_ns("test").use_db("migrations").await.unwrap();
        db
    }

    #[test]
    fn test_checksum_is_sha256_of_script() {
        let migration = Migration::new("0001_probe", "DEFINE TABLE probe;");
        assert_eq!(migration.checksum.len(), 64);
        assert_eq!(migration.checksum, Migration::new("other", "DEFINE TABLE probe;").checksum);
    }

    #[test]
    fn test_builtin_versions_are_ordered() {
        let versions: Vec<_> = builtin_migrations().into_iter().map(|m| m.version).collect();
        let mut sorted = versions.clone();
        sorted.sort_unstable();
        assert_eq!(versions, sorted);
    }

    #[tokio::test]
    async fn test_rerun_skips_applied_migrations() {
        let db = memory().await;

        let first = MigrationRunner::new(db.clone()).run().await.unwrap();
        assert_eq!(first.applied.len(), BUILTIN.len());

        let second = MigrationRunner::new(db).run().await.unwrap();
        assert!(second.applied.is_empty());
        assert_eq!(second.skipped.len(), BUILTIN.len());
    }

    #[tokio::test]
    async fn test_changed_script_is_rejected() {
        let db = memory().await;
        let original = vec![Migration::new("0001_probe", "DEFINE TABLE IF NOT EXISTS probe;")];
        MigrationRunner::with_migrations(db.clone(), original).run().await.unwrap();

        let edited = vec![Migration::new("0001_probe", "DEFINE TABLE IF NOT EXISTS probe_v2;")];
        let err = MigrationRunner::with_migrations(db, edited).run().await.unwrap_err();
        assert!(matches!(err, DatabaseError::Migration { .. }));
    }

    #[tokio::test]
    async fn test_broken_script_is_a_migration_error() {
        let db = memory().await;
        let broken = vec![Migration::new("0001_broken", "DEFINE NONSENSE;")];

        let err = MigrationRunner::with_migrations(db, broken).run().await.unwrap_err();
        assert!(matches!(err, DatabaseError::Migration { .. } | DatabaseError::Surreal { .. }));
    }
}
