use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

use super::service::DashboardService;
use crate::config::RefreshConfig;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Scheduler error: {0}")]
    Scheduler(String),
}

/// Periodic dashboard work: forecast refresh and time-of-day checks
pub struct RefreshScheduler {
    scheduler: JobScheduler,
    job_ids: Vec<Uuid>,
}

impl RefreshScheduler {
    pub async fn new() -> Result<Self, SchedulerError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| SchedulerError::Scheduler(e.to_string()))?;

        Ok(Self {
            scheduler,
            job_ids: Vec::new(),
        })
    }

    /// Register both repeated jobs. The first run of each happens one
    /// interval after `start`.
    pub async fn schedule(
        &mut self,
        dashboard: Arc<DashboardService>,
        config: &RefreshConfig,
    ) -> Result<(), SchedulerError> {
        let refresh_dashboard = Arc::clone(&dashboard);
        let refresh_job = Job::new_repeated_async(
            Duration::from_secs(config.interval_secs),
            move |_uuid, _lock| {
                let dashboard = Arc::clone(&refresh_dashboard);
                Box::pin(async move {
                    tracing::debug!("Scheduled forecast refresh");
                    let state = dashboard.refresh().await;
                    if state.error.is_some() {
                        tracing::warn!("Scheduled refresh failed, retrying next interval");
                    }
                })
            },
        )
        .map_err(|e| SchedulerError::Scheduler(e.to_string()))?;

        let clock_dashboard = Arc::clone(&dashboard);
        let clock_job = Job::new_repeated_async(
            Duration::from_secs(config.time_check_interval_secs),
            move |_uuid, _lock| {
                let dashboard = Arc::clone(&clock_dashboard);
                Box::pin(async move {
                    dashboard.reclassify();
                })
            },
        )
        .map_err(|e| SchedulerError::Scheduler(e.to_string()))?;

        for job in [refresh_job, clock_job] {
            let uuid = self
                .scheduler
                .add(job)
                .await
                .map_err(|e| SchedulerError::Scheduler(e.to_string()))?;
            self.job_ids.push(uuid);
        }

        tracing::info!(
            refresh_secs = config.interval_secs,
            time_check_secs = config.time_check_interval_secs,
            "Dashboard jobs scheduled"
        );
        Ok(())
    }

    pub async fn start(&self) -> Result<(), SchedulerError> {
        tracing::info!(jobs = self.job_count(), "Starting scheduler");
        self.scheduler
            .start()
            .await
            .map_err(|e| SchedulerError::Scheduler(e.to_string()))
    }

    pub async fn shutdown(&mut self) -> Result<(), SchedulerError> {
        for uuid in self.job_ids.drain(..) {
            if let Err(e) = self.scheduler.remove(&uuid).await {
                tracing::warn!(job_id = %uuid, error = %e, "Failed to remove job");
            }
        }
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| SchedulerError::Scheduler(e.to_string()))
    }

    pub fn job_count(&self) -> usize {
        self.job_ids.len()
    }
}
