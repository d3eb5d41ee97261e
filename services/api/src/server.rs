use crate::cli::ServeArgs;
use crate::infra::{build_site, AppState, InMemoryNotificationStore};
use crate::routes::with_site_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tourbook::config::AppConfig;
use tourbook::error::AppError;
use tourbook::notifications::{Notification, NotificationId, NotificationService};
use tourbook::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.catalog_csv.take() {
        config.site.catalog_csv = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let (site, catalog) = build_site(&config.site)?;

    let notifications = Arc::new(InMemoryNotificationStore::default());
    notifications.push(Notification {
        id: NotificationId("catalog-loaded".to_string()),
        message: format!("Catalog loaded with {} offers", catalog.len()),
        read: false,
        created_at: Utc::now(),
    });
    let notification_service = Arc::new(NotificationService::new(notifications));

    let app = with_site_routes(site, notification_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, base_url = %config.site.base_url, "tourbook site ready");

    axum::serve(listener, app).await?;
    Ok(())
}
