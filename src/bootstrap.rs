use crate::application::services::{CinemaService, ReservationService};
use crate::config::Config;
use crate::domain::ports::cinema_repository::CinemaRepository;
use crate::domain::ports::distributed_lock::DistributedLock;
use crate::infrastructure::http::middleware::AppState;
use crate::infrastructure::observability::lock_backend;
use crate::infrastructure::persistence::{
    Database, DatabaseDistributedLock, RedisDistributedLock,
};
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;

/// Pick the lock backend: Redis when configured, the database table otherwise.
pub async fn build_lock(
    db: &Database,
    config: &Config,
) -> anyhow::Result<Arc<dyn DistributedLock>> {
    match &config.redis_url {
        Some(url) => {
            let lock = RedisDistributedLock::connect(url, config.instance_id.clone())
                .await
                .context("connecting Redis lock backend")?;
            tracing::info!(
                backend = lock_backend(config),
                holder = %config.instance_id,
                "Distributed lock ready"
            );
            Ok(Arc::new(lock))
        }
        None => {
            tracing::info!(
                backend = lock_backend(config),
                holder = %config.instance_id,
                "Distributed lock ready"
            );
            Ok(Arc::new(DatabaseDistributedLock::new(
                db.clone(),
                config.instance_id.clone(),
            )))
        }
    }
}

pub fn build_app_state(
    db: Database,
    lock: Arc<dyn DistributedLock>,
    lock_ttl: Duration,
) -> AppState {
    let cinema_repo = Arc::new(db) as Arc<dyn CinemaRepository>;

    let cinema_service = CinemaService::new(cinema_repo.clone());
    let reservation_service = ReservationService::new(cinema_repo, lock, lock_ttl);
    tracing::info!(lock_ttl_ms = lock_ttl.as_millis() as u64, "Reservation service initialized");

    AppState {
        cinema_service,
        reservation_service,
    }
}
