//! Application assembly and lifecycle.

use axum::Router;
use catalog_config::AppConfig;
use catalog_core::{CatalogError, CatalogResult};
use catalog_repository::{create_pool, DatabasePoolInterface, PostgresProductRepository};
use catalog_rest::{create_router, AppState};
use catalog_service::{ProductServiceImpl, RedisCacheService};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::startup::{print_startup_info, shutdown_signal};

/// Builds every component from `config` and serves until a shutdown signal.
///
/// The database pool is created before the listener is bound, so a store that
/// is unreachable at startup fails fast. Redis connects lazily.
pub async fn run(config: AppConfig) -> CatalogResult<()> {
    info!("Environment: {}", config.app.environment);

    let db_pool = create_pool(&config.database).await?;
    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }

    let cache = Arc::new(RedisCacheService::from_config(&config.redis)?);
    if !config.redis.enabled {
        warn!("Redis cache disabled, every request reads the database");
    }

    let product_repository = Arc::new(PostgresProductRepository::new(db_pool.clone()));
    let product_service = Arc::new(ProductServiceImpl::new(product_repository, cache.clone()));

    let state = AppState::new(product_service)
        .with_health_check(db_pool.clone())
        .with_health_check(cache);
    let router = create_router(state);

    let addr = config.server.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| CatalogError::Internal(format!("Failed to bind {addr}: {e}")))?;
    info!("Starting HTTP server on http://{}", addr);
    print_startup_info(&addr);

    serve(
        listener,
        router,
        shutdown_signal(),
        config.server.shutdown_grace(),
        db_pool.close(),
    )
    .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Serves `router` on `listener` until `shutdown` resolves, then runs
/// `cleanup`.
///
/// After `shutdown`, in-flight requests get `grace` to finish. When it
/// elapses the accept loop is aborted; connections it already handed off are
/// left to end with the process. `cleanup` is bounded by whatever remains of
/// `grace`, so the whole shutdown never outlasts it.
pub async fn serve<S, C>(
    listener: TcpListener,
    router: Router,
    shutdown: S,
    grace: Duration,
    cleanup: C,
) -> CatalogResult<()>
where
    S: Future<Output = ()> + Send,
    C: Future<Output = ()>,
{
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = stop_rx.await;
            })
            .await
    });

    let stopped_early = tokio::select! {
        joined = &mut server => Some(server_outcome(joined)),
        () = shutdown => None,
    };

    let deadline = Instant::now() + grace;
    let served = match stopped_early {
        Some(outcome) => outcome,
        None => {
            let _ = stop_tx.send(());
            info!(grace_secs = grace.as_secs_f64(), "Draining in-flight requests");

            match tokio::time::timeout_at(deadline, &mut server).await {
                Ok(joined) => server_outcome(joined),
                Err(_) => {
                    warn!("Shutdown grace period elapsed, abandoning remaining requests");
                    server.abort();
                    Ok(())
                }
            }
        }
    };

    if tokio::time::timeout_at(deadline, cleanup).await.is_err() {
        warn!("Cleanup did not finish within the shutdown grace period");
    }

    served
}

fn server_outcome(
    joined: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> CatalogResult<()> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(CatalogError::Internal(format!("HTTP server error: {e}"))),
        Err(e) => Err(CatalogError::Internal(format!("HTTP server task failed: {e}"))),
    }
}
