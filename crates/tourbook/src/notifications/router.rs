use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Form, Json, Router,
};

use super::{MarkReadForm, Notification, NotificationService, NotificationStore};
use crate::error::SiteError;

/// Router builder exposing the admin console notification endpoints.
pub fn notification_router<S>(service: Arc<NotificationService<S>>) -> Router
where
    S: NotificationStore + 'static,
{
    Router::new()
        .route("/admin/notifications", get(list_handler::<S>))
        .route("/admin/notifications/read", post(mark_read_handler::<S>))
        .with_state(service)
}

pub(crate) async fn list_handler<S>(
    State(service): State<Arc<NotificationService<S>>>,
) -> Result<Json<Vec<Notification>>, SiteError>
where
    S: NotificationStore + 'static,
{
    service.list().map(Json)
}

pub(crate) async fn mark_read_handler<S>(
    State(service): State<Arc<NotificationService<S>>>,
    Form(form): Form<MarkReadForm>,
) -> Result<Json<Notification>, SiteError>
where
    S: NotificationStore + 'static,
{
    service.mark_read(form).map(Json)
}
