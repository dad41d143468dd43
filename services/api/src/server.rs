use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::{cors_layer, service_routes};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

use priceflow::catalog::{CatalogStore, SupabaseCatalog};
use priceflow::config::AppConfig;
use priceflow::error::AppError;
use priceflow::pricing::{ArtifactStore, DiscountService};
use priceflow::telemetry;
use priceflow::trend::StockHistory;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let credentials = config.catalog.credentials()?;
    let cors_origins = config.cors.origin_values()?;

    let artifacts = Arc::new(ArtifactStore::load(&config.artifacts.dir)?);
    info!(
        features = artifacts.model().feature_order().len(),
        "prediction artifacts loaded"
    );
    let pricing = Arc::new(DiscountService::new(artifacts));

    let history = Arc::new(StockHistory::from_path(&config.trend.dataset)?);
    info!(rows = history.len(), "stock history loaded");

    let catalog: Arc<dyn CatalogStore> = Arc::new(SupabaseCatalog::new(
        credentials.base_url,
        &credentials.service_key,
    )?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = service_routes(pricing, catalog, history)
        .layer(cors_layer(cors_origins))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "price flow service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
