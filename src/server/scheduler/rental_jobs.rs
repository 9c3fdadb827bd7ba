use std::sync::Arc;

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    mail::Mailer,
    service::{
        auth::AuthService, notification::NotificationService, reservation::ReservationService,
    },
};

/// Settings the rental jobs need besides the database.
#[derive(Clone)]
pub struct RentalJobs {
    pub mailer: Arc<dyn Mailer>,
    pub mail_from: String,
    /// How long an unpaid reservation holds its car. Zero disables expiry.
    pub pending_hold: Duration,
}

/// Starts the rental scheduler
///
/// This scheduler fires every minute and, unless the previous pass is still running:
/// - Delivers pending notifications from the outbox
/// - Cancels unpaid reservations older than the hold window
/// - Marks cars of confirmed rentals starting today as rented
/// - Completes confirmed rentals that have ended and releases their cars
/// - Purges expired bearer tokens
///
/// # Arguments
/// - `db`: Database connection
/// - `jobs`: Mailer and timing settings
///
/// # Returns
/// - `Ok(JobScheduler)` - The running scheduler; dropping it does not stop the jobs
/// - `Err(AppError::SchedulerErr)` - The scheduler could not be created or started
pub async fn start_scheduler(
    db: DatabaseConnection,
    jobs: RentalJobs,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;
    let guard = RunGuard::default();

    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let db = db.clone();
        let jobs = jobs.clone();
        let guard = guard.clone();

        Box::pin(async move {
            guard.run(&db, &jobs).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Rental scheduler started");

    Ok(scheduler)
}

/// Keeps scheduler passes from overlapping when one outlasts the cron interval.
#[derive(Clone, Default)]
pub struct RunGuard(Arc<Mutex<()>>);

impl RunGuard {
    /// Runs one pass unless another is still in flight.
    ///
    /// # Returns
    /// - `true` - The pass ran
    /// - `false` - Skipped, a previous pass has not finished
    pub async fn run(&self, db: &DatabaseConnection, jobs: &RentalJobs) -> bool {
        let Ok(_running) = self.0.try_lock() else {
            tracing::warn!("Previous rental jobs pass still running, skipping this tick");
            return false;
        };

        run_rental_jobs(db, jobs).await;

        true
    }
}

/// Runs every job once. A failing job is logged and does not stop the others.
pub async fn run_rental_jobs(db: &DatabaseConnection, jobs: &RentalJobs) {
    let now = Utc::now();
    let today = now.date_naive();
    let reservations = ReservationService::new(db);

    match NotificationService::new(db, jobs.mailer.as_ref(), &jobs.mail_from)
        .dispatch_pending()
        .await
    {
        Ok(summary) if summary.sent + summary.retrying + summary.failed > 0 => {
            tracing::debug!(
                sent = summary.sent,
                retrying = summary.retrying,
                failed = summary.failed,
                "Dispatched notifications"
            );
        }
        Ok(_) => {}
        Err(e) => tracing::error!("Error dispatching notifications: {}", e),
    }

    if let Err(e) = reservations.expire_pending(now, jobs.pending_hold).await {
        tracing::error!("Error expiring pending reservations: {}", e);
    }

    if let Err(e) = reservations.mark_rentals_started(today).await {
        tracing::error!("Error marking started rentals: {}", e);
    }

    if let Err(e) = reservations.complete_finished(today).await {
        tracing::error!("Error completing finished rentals: {}", e);
    }

    if let Err(e) = purge_tokens(db).await {
        tracing::error!("Error purging expired tokens: {}", e);
    }
}

async fn purge_tokens(db: &DatabaseConnection) -> Result<(), AppError> {
    let purged = AuthService::new(db, Duration::zero())
        .purge_expired(Utc::now())
        .await?;

    if purged > 0 {
        tracing::debug!(purged, "Purged expired bearer tokens");
    }

    Ok(())
}
