//! Embedded schema migrations.
//!
//! Migrations are compiled into the binary with `embed_migrations!` and
//! applied through a blocking [`MigrationHarness`] running on a dedicated
//! blocking thread, since diesel's harness is synchronous.

use std::time::{Duration, Instant};

use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::MigrationHarness;
use tokio::task::spawn_blocking;

use crate::{MIGRATIONS, PgClient, PgError, PgResult, TRACING_TARGET_MIGRATION};

/// Outcome of a migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationResult {
    /// Wall time spent applying migrations.
    pub duration: Duration,
    /// Versions applied during this run.
    pub processed_versions: Vec<String>,
}

impl MigrationResult {
    /// Returns whether nothing had to be applied.
    #[inline]
    pub fn is_no_op(&self) -> bool {
        self.processed_versions.is_empty()
    }
}

/// Migration capabilities for [`PgClient`].
pub trait PgClientMigrationExt {
    /// Applies all pending embedded migrations.
    ///
    /// Safe to call on every startup: already applied versions are skipped.
    fn run_pending_migrations(&self) -> impl Future<Output = PgResult<MigrationResult>> + Send;
}

impl PgClientMigrationExt for PgClient {
    async fn run_pending_migrations(&self) -> PgResult<MigrationResult> {
        let start = Instant::now();
        let conn = self.get_connection().await?.into_inner();
        let mut conn: AsyncConnectionWrapper<_> = conn.into();

        let versions = spawn_blocking(move || {
            conn.run_pending_migrations(MIGRATIONS).map(|versions| {
                versions
                    .into_iter()
                    .map(|version| version.to_string())
                    .collect::<Vec<_>>()
            })
        })
        .await
        .map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET_MIGRATION,
                error = %err,
                "Migration task panicked"
            );
            PgError::Migration(err.into())
        })?
        .map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET_MIGRATION,
                error = %err,
                "Failed to apply migrations"
            );
            PgError::Migration(err)
        })?;

        let result = MigrationResult {
            duration: start.elapsed(),
            processed_versions: versions,
        };

        if result.is_no_op() {
            tracing::info!(target: TRACING_TARGET_MIGRATION, "Database schema is up to date");
        } else {
            tracing::info!(
                target: TRACING_TARGET_MIGRATION,
                applied = result.processed_versions.len(),
                versions = ?result.processed_versions,
                duration = ?result.duration,
                "Database migrations completed"
            );
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_run_is_no_op() {
        let result = MigrationResult {
            duration: Duration::from_millis(5),
            processed_versions: Vec::new(),
        };
        assert!(result.is_no_op());
    }
}
