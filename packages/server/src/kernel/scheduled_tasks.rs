//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! One recurring task: contribution recalculation on the first day of
//! each calendar month. The scheduler is owned by the binary - started
//! after init, shut down on exit - so there is structurally one instance
//! of the job, never a module-level singleton.
//!
//! ```text
//! Scheduler (1st of each month, 00:00)
//!     │
//!     └─► run_monthly_recalculation()
//!             └─► one transaction: read all members → accrue → write totals
//! ```
//!
//! The whole batch commits or rolls back together. A failed run is
//! logged and retried on the next scheduled fire; it never partially
//! commits.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::config::Config;
use crate::domains::member::dues;
use crate::domains::member::models::member::Member;

/// Start all scheduled tasks
pub async fn start_scheduler(pool: PgPool, config: Config) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let recalc_pool = pool.clone();
    let recalc_config = config.clone();
    let recalc_job = Job::new_async("0 0 0 1 * *", move |_uuid, _lock| {
        let pool = recalc_pool.clone();
        let config = recalc_config.clone();
        Box::pin(async move {
            match run_monthly_recalculation(&pool, &config).await {
                Ok(count) => {
                    tracing::info!("Monthly recalculation updated {} members", count);
                }
                Err(e) => {
                    tracing::error!(
                        "Monthly recalculation failed, will retry next cycle: {}",
                        e
                    );
                }
            }
        })
    })?;

    scheduler.add(recalc_job).await?;
    scheduler.start().await?;

    tracing::info!("Scheduled tasks started (contribution recalculation on the 1st of each month)");
    Ok(scheduler)
}

/// Recalculate every member's contribution as of the current month.
pub async fn run_monthly_recalculation(pool: &PgPool, config: &Config) -> Result<u64> {
    let reference = dues::month_start(Utc::now().date_naive());
    recalculate_all(pool, config, reference).await
}

/// Recalculate every member's contribution as of a reference month.
///
/// Runs in a single transaction: the full member set is read under row
/// locks and every total is replaced unconditionally. The accrual
/// function is pure, so last-write-wins needs no conflict detection; any
/// failure aborts the whole batch.
pub async fn recalculate_all(
    pool: &PgPool,
    config: &Config,
    reference_month_start: NaiveDate,
) -> Result<u64> {
    tracing::info!(
        "Recalculating contributions as of {}",
        reference_month_start
    );

    let mut tx = pool.begin().await?;

    let members = sqlx::query_as::<_, Member>("SELECT * FROM members FOR UPDATE")
        .fetch_all(&mut *tx)
        .await?;

    let mut updated = 0u64;
    for member in &members {
        let total = dues::accrue(member, reference_month_start, config);
        sqlx::query("UPDATE members SET contribution = $2 WHERE id = $1")
            .bind(member.id)
            .bind(total)
            .execute(&mut *tx)
            .await?;
        updated += 1;
    }

    tx.commit().await?;

    Ok(updated)
}
