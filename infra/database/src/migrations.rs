use crate::error::{DatabaseError, DatabaseErrorExt};
use fxhash::{FxHashMap, FxHashSet};
use hrhub_domain::constants::MIGRATION_TABLE;
use sha2::{Digest, Sha256};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use surrealdb::types::SurrealValue;

/// A versioned `SurrealQL` script contributed by a feature slice.
///
/// The runner wraps every script in its own transaction, so scripts must not open or commit
/// transactions themselves.
#[derive(Debug, Clone)]
pub struct Migration {
    slice: &'static str,
    version: &'static str,
    script: &'static str,
    checksum: String,
}

impl Migration {
    #[must_use]
    pub fn new(slice: &'static str, version: &'static str, script: &'static str) -> Self {
        let checksum = hex::encode(Sha256::digest(script.as_bytes()));
        Self { slice, version, script, checksum }
    }

    #[must_use]
    pub const fn slice(&self) -> &'static str {
        self.slice
    }

    #[must_use]
    pub const fn version(&self) -> &'static str {
        self.version
    }

    /// Lowercase hex SHA-256 of the script.
    #[must_use]
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    fn key(&self) -> String {
        format!("{}:{}", self.slice, self.version)
    }

    fn to_applied(&self) -> AppliedMigration {
        AppliedMigration {
            slice: self.slice.to_owned(),
            version: self.version.to_owned(),
            checksum: self.checksum.clone(),
        }
    }
}

/// Outcome of a migration run.
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub applied: Vec<AppliedMigration>,
    pub skipped: Vec<AppliedMigration>,
}

/// A ledger row of the `migration` table.
#[derive(Debug, Clone, PartialEq, Eq, SurrealValue)]
pub struct AppliedMigration {
    pub slice: String,
    pub version: String,
    pub checksum: String,
}

#[derive(Debug)]
pub(crate) struct MigrationRunner<'a> {
    db: &'a Surreal<Any>,
}

impl<'a> MigrationRunner<'a> {
    pub(crate) const fn new(db: &'a Surreal<Any>) -> Self {
        Self { db }
    }

    /// Applies every migration missing from the ledger, in the given order.
    ///
    /// Already applied migrations are skipped after their checksum is compared with the ledger.
    pub(crate) async fn run(&self, migrations: &[Migration]) -> Result<MigrationReport, DatabaseError> {
        validate(migrations)?;
        self.ensure_ledger().await?;

        let ledger = self.load_ledger().await?;
        let mut report = MigrationReport::default();

        for migration in migrations {
            if let Some(applied) = ledger.get(&migration.key()) {
                ensure_checksum_match(migration, &applied.checksum)?;
                report.skipped.push(migration.to_applied());
                continue;
            }

            self.apply(migration).await?;
            report.applied.push(migration.to_applied());
        }

        Ok(report)
    }

    async fn ensure_ledger(&self) -> Result<(), DatabaseError> {
        let query = format!(
            "DEFINE TABLE IF NOT EXISTS {MIGRATION_TABLE} SCHEMAFULL;
            DEFINE FIELD IF NOT EXISTS slice ON {MIGRATION_TABLE} TYPE string;
            DEFINE FIELD IF NOT EXISTS version ON {MIGRATION_TABLE} TYPE string;
            DEFINE FIELD IF NOT EXISTS checksum ON {MIGRATION_TABLE} TYPE string;
            DEFINE FIELD IF NOT EXISTS applied_at ON {MIGRATION_TABLE} TYPE datetime;
            DEFINE INDEX IF NOT EXISTS {MIGRATION_TABLE}_key ON {MIGRATION_TABLE} FIELDS slice, version UNIQUE;"
        );

        self.db
            .query(query)
            .await
            .context("Defining migration ledger")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Defining migration ledger")?;

        Ok(())
    }

    async fn load_ledger(&self) -> Result<FxHashMap<String, AppliedMigration>, DatabaseError> {
        let entries = self
            .db
            .query(format!("SELECT slice, version, checksum FROM {MIGRATION_TABLE}"))
            .await
            .context("Loading applied migrations")?
            .take::<Vec<AppliedMigration>>(0)
            .context("Parsing migration ledger")?;

        Ok(entries
            .into_iter()
            .map(|entry| (format!("{}:{}", entry.slice, entry.version), entry))
            .collect())
    }

    async fn apply(&self, migration: &Migration) -> Result<(), DatabaseError> {
        let query = format!(
            "BEGIN TRANSACTION;
            {}
            CREATE {MIGRATION_TABLE} CONTENT {{
                slice: $slice,
                version: $version,
                checksum: $checksum,
                applied_at: time::now()
            }};
            COMMIT TRANSACTION;",
            migration.script,
        );

        let context = format!("SQL execution failed at {}", migration.key());

        self.db
            .query(query)
            .bind(("slice", migration.slice))
            .bind(("version", migration.version))
            .bind(("checksum", migration.checksum.clone()))
            .await
            .context(context.clone())?
            .check()
            .map_err(surrealdb::Error::from)
            .context(context)?;

        Ok(())
    }
}

fn validate(migrations: &[Migration]) -> Result<(), DatabaseError> {
    let mut seen = FxHashSet::default();

    for migration in migrations {
        if !seen.insert(migration.key()) {
            return Err(DatabaseError::Migration {
                message: format!("Duplicate migration {}", migration.key()).into(),
                context: None,
            });
        }

        let script = migration.script.to_lowercase();
        if script.contains("begin transaction") || script.contains("commit transaction") {
            return Err(DatabaseError::Migration {
                message: format!(
                    "Manual transaction control prohibited in {}; the runner wraps each script",
                    migration.key()
                )
                .into(),
                context: None,
            });
        }
    }

    Ok(())
}

fn ensure_checksum_match(migration: &Migration, existing: &str) -> Result<(), DatabaseError> {
    if existing != migration.checksum {
        return Err(DatabaseError::Migration {
            message: format!(
                "Checksum mismatch for {} (expected {}, got {})",
                migration.key(),
                existing,
                migration.checksum
            )
            .into(),
            context: Some("Migration already applied with different checksum".into()),
        });
    }
    Ok(())
}
