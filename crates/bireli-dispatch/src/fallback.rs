//! Direct-route fallback resolution.
//!
//! Lets convention-based URLs (`/controllerName/actionName/arg1/arg2`)
//! dispatch without an explicit route rule: when no named route matched,
//! the request's positional route parameters are reinterpreted as a
//! controller/action pair plus action parameters.

use crate::files::FileExistence;
use crate::resolver::Dispatcher;
use bireli_http::Request;
use bireli_urls::Route;
use serde_json::Value;
use tracing::debug;

/// Synthesize a route from the request's positional route parameters.
///
/// The first parameter's key names the controller; its value is the action
/// identifier, except for the exact integer `1` (the router's marker for
/// "no explicit action given"), which maps to `index`. The remaining
/// parameters (controller key removed) become the action parameters.
///
/// Returns the synthetic route only if the resolved controller's backing
/// file actually exists; otherwise `None`, signalling that normal 404
/// handling should take over. Empty route parameters return `None` without
/// consulting the dispatcher.
pub async fn direct_route(
    request: &Request,
    dispatcher: &Dispatcher,
    files: &FileExistence,
) -> Option<Route> {
    let params = request.route_params();
    let (controller, value) = params.first()?;

    let action = if *value == Value::from(1) {
        "index".to_string()
    } else {
        match value.as_str() {
            Some(s) => s.to_string(),
            None => value.to_string(),
        }
    };

    let route = Route::direct(controller, action, params.without(controller));
    let token = dispatcher.resolve(&route).ok()?;

    if files.controller_file_exists(token.source()).await {
        debug!(
            controller = %route.controller(),
            action = %route.action(),
            "direct route resolved"
        );
        Some(route)
    } else {
        debug!(
            controller = %route.controller(),
            source = %token.source().display(),
            "no direct route, backing file absent"
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ControllerRegistry;
    use bireli_http::RouteParams;
    use hyper::Method;
    use serde_json::json;
    use std::sync::Arc;

    fn request_with(params: RouteParams) -> Request {
        let mut request = Request::builder()
            .method(Method::GET)
            .uri("/")
            .build()
            .unwrap();
        request.route_params = params;
        request
    }

    fn dispatcher_over(dir: &std::path::Path) -> Dispatcher {
        Dispatcher::new(Arc::new(ControllerRegistry::new()), dir)
    }

    #[tokio::test]
    async fn test_integer_one_means_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("blog.rs"), "// blog").unwrap();

        let mut params = RouteParams::new();
        params.insert("blog", json!(1));
        params.insert("id", json!("42"));

        let route = direct_route(
            &request_with(params),
            &dispatcher_over(dir.path()),
            &FileExistence::direct(),
        )
        .await
        .unwrap();

        assert_eq!(route.controller(), "blog");
        assert_eq!(route.action(), "index");
        assert_eq!(route.params().get_str("id"), Some("42"));
        assert_eq!(route.params().len(), 1);
    }

    #[tokio::test]
    async fn test_string_value_is_the_action() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("blog.rs"), "// blog").unwrap();

        let mut params = RouteParams::new();
        params.insert("blog", json!("show"));
        params.insert("id", json!("42"));

        let route = direct_route(
            &request_with(params),
            &dispatcher_over(dir.path()),
            &FileExistence::direct(),
        )
        .await
        .unwrap();

        assert_eq!(route.action(), "show");
        assert_eq!(route.params().get_str("id"), Some("42"));
    }

    #[tokio::test]
    async fn test_string_one_is_not_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("blog.rs"), "// blog").unwrap();

        let mut params = RouteParams::new();
        params.insert("blog", json!("1"));

        let route = direct_route(
            &request_with(params),
            &dispatcher_over(dir.path()),
            &FileExistence::direct(),
        )
        .await
        .unwrap();

        assert_eq!(route.action(), "1");
    }

    #[tokio::test]
    async fn test_empty_params_short_circuit() {
        let dir = tempfile::tempdir().unwrap();

        let route = direct_route(
            &request_with(RouteParams::new()),
            &dispatcher_over(dir.path()),
            &FileExistence::direct(),
        )
        .await;

        assert!(route.is_none());
    }

    #[tokio::test]
    async fn test_missing_backing_file_yields_none() {
        let dir = tempfile::tempdir().unwrap();

        let mut params = RouteParams::new();
        params.insert("ghost", json!("index"));

        let route = direct_route(
            &request_with(params),
            &dispatcher_over(dir.path()),
            &FileExistence::direct(),
        )
        .await;

        assert!(route.is_none());
    }
}
