//! # Bireli Dispatch
//!
//! The front-controller core of the Bireli framework.
//!
//! A request that has already been matched to a route is resolved into a
//! [`DispatchToken`], and the [`FrontController`] runs the dispatch loop:
//! instantiate the target controller, wrap the action invocation in
//! pre/post-dispatch hooks at both the front-controller and the controller
//! level, and follow any forwarding token the hooks produce, all without
//! the client issuing a new HTTP request. One [`Response`] accumulates
//! across the whole chain.
//!
//! ## Architecture
//!
//! ```text
//! Request → Router → Route → Dispatcher → DispatchToken
//!                                              ↓
//!            FrontController::dispatch ─── loop ──────────────────┐
//!              policy.on_pre_dispatch                             │
//!              controller.on_pre_dispatch                         │
//!              controller.call_action   → appends into Response   │
//!              controller.on_post_dispatch ─┐                     │
//!              policy.on_post_dispatch ←────┘ may forward ────────┘
//!                                              ↓ no token left
//!                              policy.filter_response → Response
//! ```
//!
//! Hook authority is split on purpose: the policy sees every iteration and
//! can veto or redirect any action (auth, logging, feature gating) without
//! touching controllers, while each controller's own hooks wrap just its
//! actions.
//!
//! ## Examples
//!
//! ```rust
//! use bireli_dispatch::{Controller, ControllerRegistry, Dispatcher, FrontController};
//! use bireli_http::{Extensions, Request, Response, RouteParams};
//! use bireli_urls::{DefaultRouter, Router, UrlRule};
//! use async_trait::async_trait;
//! use hyper::Method;
//! use std::sync::Arc;
//!
//! struct BlogController;
//!
//! #[async_trait]
//! impl Controller for BlogController {
//!     fn has_action(&self, action: &str) -> bool {
//!         matches!(action, "index" | "show")
//!     }
//!
//!     async fn call_action(
//!         &mut self,
//!         action: &str,
//!         params: &RouteParams,
//!         _request: &Request,
//!         response: &mut Response,
//!     ) -> bireli_http::Result<()> {
//!         match action {
//!             "index" => response.append_body("all posts"),
//!             _ => response.append_body(format!("post {}", params.get_str("id").unwrap_or("?"))),
//!         }
//!         Ok(())
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! // The backing file a controller is expected to come from is checked
//! // for existence before instantiation.
//! let dir = tempfile::tempdir().unwrap();
//! let source = dir.path().join("blog.rs");
//! std::fs::write(&source, "// blog controller").unwrap();
//!
//! let mut registry = ControllerRegistry::new();
//! registry.register("blog", &source, || Box::new(BlogController));
//! let registry = Arc::new(registry);
//!
//! let mut router = DefaultRouter::new();
//! router.add_rule(UrlRule::new("/blog/{id}/", "blog", "show").unwrap());
//!
//! let dispatcher = Dispatcher::new(registry.clone(), "app/controllers");
//! let front = FrontController::new(registry);
//!
//! let request = Request::builder()
//!     .method(Method::GET)
//!     .uri("/blog/42/")
//!     .build()
//!     .unwrap();
//! let route = router.resolve(&request).unwrap();
//! let token = dispatcher.resolve(&route).unwrap();
//!
//! let response = front
//!     .dispatch(&request, &Extensions::new(), &router, &dispatcher, &route, token)
//!     .await
//!     .unwrap();
//! assert_eq!(&response.body[..], b"post 42");
//! # });
//! ```

pub mod config;
pub mod controller;
pub mod fallback;
pub mod files;
pub mod front;
pub mod resolver;
pub mod token;

// Re-exports
pub use config::DispatchConfig;
pub use controller::{create_controller_instance, Controller, ControllerFactory, ControllerRegistry};
pub use fallback::direct_route;
pub use files::FileExistence;
pub use front::{DefaultPolicy, DispatchContext, DispatchPolicy, FrontController};
pub use resolver::Dispatcher;
pub use token::DispatchToken;

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving or running a dispatch
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The target controller's backing file does not exist
    #[error("invalid controller '{controller}': backing file {file} does not exist")]
    InvalidController { controller: String, file: PathBuf },

    /// The resolved action is not callable on the resolved controller
    #[error("invalid action '{action}': not callable on controller '{controller}'")]
    InvalidAction { controller: String, action: String },

    /// Debug-mode integrity failure: the backing file is present but no
    /// controller was registered under the expected identifier (usually a
    /// scaffolded file that was copied but never wired up)
    #[error("backing file {file} exists but controller '{controller}' was never registered")]
    MissingRegistration { controller: String, file: PathBuf },

    /// Generic construction failure (release mode)
    #[error("unable to construct controller '{0}'")]
    Construction(String),

    /// The route carries an empty controller or action identifier
    #[error("route is not dispatchable: {0}")]
    InvalidRoute(String),

    /// The configured forward limit was exceeded
    #[error("aborted after exceeding {0} internal forwards")]
    ForwardLimit(usize),

    /// An error raised by a hook or action; propagated to the dispatch
    /// caller unmodified
    #[error(transparent)]
    Application(#[from] bireli_http::Error),
}

pub type Result<T> = std::result::Result<T, DispatchError>;
