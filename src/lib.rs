//! # Bireli
//!
//! A small MVC web framework for Rust built around a forwarding front
//! controller.
//!
//! Bireli's core is its dispatch loop: an incoming request, once matched
//! to a route, is resolved into a dispatch token and handed to the
//! [`FrontController`], which instantiates the target controller, wraps
//! the action in pre/post-dispatch hooks at both the front-controller and
//! the controller level, and follows any forwarding token those hooks
//! produce, redirecting the flow to a different controller/action without
//! a new client request. One [`Response`] accumulates across the whole
//! chain.
//!
//! ## Crates
//!
//! - [`http`] - request/response value objects, route parameters, and the
//!   type-safe extensions store
//! - [`urls`] - route rules, pattern matching, reverse lookup, and
//!   positional-segment parsing
//! - [`dispatch`] - the front controller, dispatch loop, controller
//!   registry, and direct-route fallback
//! - [`cache`] - the TTL cache abstraction behind the controller
//!   file-existence check
//!
//! ## Quick start
//!
//! ```rust
//! use bireli::{
//!     Controller, ControllerRegistry, DefaultRouter, Dispatcher, Extensions,
//!     FrontController, Request, Response, RouteParams, Router, UrlRule,
//! };
//! use async_trait::async_trait;
//! use hyper::Method;
//! use std::sync::Arc;
//!
//! struct HelloController;
//!
//! #[async_trait]
//! impl Controller for HelloController {
//!     fn has_action(&self, action: &str) -> bool {
//!         action == "index"
//!     }
//!
//!     async fn call_action(
//!         &mut self,
//!         _action: &str,
//!         _params: &RouteParams,
//!         _request: &Request,
//!         response: &mut Response,
//!     ) -> bireli_http::Result<()> {
//!         response.append_body("Hello, World!");
//!         Ok(())
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let dir = tempfile::tempdir().unwrap();
//! let source = dir.path().join("hello.rs");
//! std::fs::write(&source, "// hello controller").unwrap();
//!
//! let mut registry = ControllerRegistry::new();
//! registry.register("hello", &source, || Box::new(HelloController));
//! let registry = Arc::new(registry);
//!
//! let mut router = DefaultRouter::new();
//! router.add_rule(UrlRule::new("/", "hello", "index").unwrap());
//!
//! let dispatcher = Dispatcher::new(registry.clone(), dir.path());
//! let front = FrontController::new(registry);
//!
//! let request = Request::builder().method(Method::GET).uri("/").build().unwrap();
//! let route = router.resolve(&request).unwrap();
//! let token = dispatcher.resolve(&route).unwrap();
//!
//! let response = front
//!     .dispatch(&request, &Extensions::new(), &router, &dispatcher, &route, token)
//!     .await
//!     .unwrap();
//! assert_eq!(&response.body[..], b"Hello, World!");
//! # });
//! ```

pub use bireli_cache as cache;
pub use bireli_dispatch as dispatch;
pub use bireli_http as http;
pub use bireli_urls as urls;

// Commonly used types at the crate root
pub use bireli_dispatch::{
    Controller, ControllerRegistry, DispatchConfig, DispatchError, DispatchPolicy, DispatchToken,
    Dispatcher, FrontController,
};
pub use bireli_http::{Extensions, Request, Response, RouteParams};
pub use bireli_urls::{DefaultRouter, Route, Router, UrlRule};
