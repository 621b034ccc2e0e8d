//! Blog example: routes, direct-route fallback, and an internal forward
//! from a guarded action to the login screen.
//!
//! ```bash
//! cargo run -p examples-blog
//! curl http://127.0.0.1:8000/blog/
//! curl http://127.0.0.1:8000/blog/42/
//! curl http://127.0.0.1:8000/blog/edit/id/42          # forwards to login
//! curl "http://127.0.0.1:8000/blog/edit/id/42?token=x"
//! ```

mod controllers;
mod policy;

use bireli::{
    ControllerRegistry, DefaultRouter, DispatchConfig, DispatchError, Dispatcher, Extensions,
    FrontController, Request, Response, Router, UrlRule,
};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

struct App {
    router: DefaultRouter,
    dispatcher: Dispatcher,
    front: FrontController,
    bootstrap: Extensions,
}

fn build_app() -> Result<App, Box<dyn std::error::Error>> {
    let config = match std::fs::read_to_string("config/dispatch.yaml") {
        Ok(source) => DispatchConfig::from_yaml(&source)?,
        Err(_) => DispatchConfig::default(),
    };

    let mut registry = ControllerRegistry::new();
    registry.register("blog", controllers::blog::SOURCE, || {
        Box::new(controllers::BlogController::new())
    });
    registry.register("login", controllers::login::SOURCE, || {
        Box::<controllers::LoginController>::default()
    });
    let registry = Arc::new(registry);

    let mut router = DefaultRouter::new();
    router.add_rule(UrlRule::new("/", "blog", "index")?.with_name("home"));
    router.add_rule(UrlRule::new("/blog/", "blog", "index")?.with_name("blog-index"));
    router.add_rule(UrlRule::new("/blog/{id}/", "blog", "show")?.with_name("blog-detail"));

    Ok(App {
        router,
        dispatcher: Dispatcher::new(registry.clone(), "examples-blog/src/controllers"),
        front: FrontController::new(registry)
            .with_policy(Arc::new(policy::BlogPolicy))
            .with_config(config),
        bootstrap: Extensions::new(),
    })
}

async fn respond(app: &App, mut request: Request) -> Response {
    let route = match app.router.resolve(&request) {
        Some(route) => route,
        None => {
            // No named route: try the positional-segment convention
            request.route_params = DefaultRouter::segment_params(request.path());
            match app.front.direct_route(&request, &app.dispatcher).await {
                Some(route) => route,
                None => return Response::not_found().with_body("no such page\n"),
            }
        }
    };

    for (name, value) in route.params().iter() {
        request.set_route_param(name, value.clone());
    }

    let token = match app.dispatcher.resolve(&route) {
        Ok(token) => token,
        Err(err) => {
            error!(error = %err, "route resolution failed");
            return Response::internal_server_error();
        }
    };

    match app
        .front
        .dispatch(
            &request,
            &app.bootstrap,
            &app.router,
            &app.dispatcher,
            &route,
            token,
        )
        .await
    {
        Ok(response) => response,
        Err(err @ (DispatchError::InvalidController { .. } | DispatchError::InvalidAction { .. })) => {
            warn!(error = %err, "dispatch target missing");
            Response::not_found().with_body("no such page\n")
        }
        Err(err) => {
            error!(error = %err, "dispatch failed");
            Response::internal_server_error().with_body("dispatch failed\n")
        }
    }
}

async fn handle(
    app: Arc<App>,
    req: hyper::Request<Incoming>,
) -> Result<hyper::Response<Full<Bytes>>, std::convert::Infallible> {
    let (parts, body) = req.into_parts();
    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            warn!(error = %err, "failed to read request body");
            Bytes::new()
        }
    };

    let request = Request::new(parts.method, parts.uri, parts.version, parts.headers, body);
    let response = respond(&app, request).await;

    let mut http_response = hyper::Response::new(Full::new(response.body));
    *http_response.status_mut() = response.status;
    *http_response.headers_mut() = response.headers;
    Ok(http_response)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let app = Arc::new(build_app()?);
    let listener = TcpListener::bind("127.0.0.1:8000").await?;
    info!("listening on http://127.0.0.1:8000");

    loop {
        let (stream, _) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let app = app.clone();
        tokio::task::spawn(async move {
            if let Err(err) = http1::Builder::new()
                .serve_connection(io, service_fn(move |req| handle(app.clone(), req)))
                .await
            {
                warn!(error = %err, "connection error");
            }
        });
    }
}
