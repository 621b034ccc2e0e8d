//! Controller trait, registry, and instantiation.
//!
//! Controllers are resolved by string identifier at dispatch time, so they
//! are registered up front: a factory keyed by controller name, plus the
//! backing source path the controller is expected to come from (callers
//! typically pass `file!()`). Registry lookup is idempotent; registration
//! happens once at startup.

use crate::files::FileExistence;
use crate::front::DispatchContext;
use crate::token::DispatchToken;
use crate::{DispatchError, Result};
use async_trait::async_trait;
use bireli_http::{Request, Response, RouteParams};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A dispatchable controller.
///
/// One fresh instance is created per dispatch-loop iteration; instances
/// are never reused across iterations, even when a forwarding chain
/// targets the same controller twice. The lifecycle hooks default to
/// pass-through implementations.
#[async_trait]
pub trait Controller: Send + Sync {
    /// Whether the named action is callable on this controller
    fn has_action(&self, action: &str) -> bool;

    /// Invoke the named action with the token's parameter list.
    ///
    /// Only called with an action for which [`has_action`](Self::has_action)
    /// returned true.
    async fn call_action(
        &mut self,
        action: &str,
        params: &RouteParams,
        request: &Request,
        response: &mut Response,
    ) -> bireli_http::Result<()>;

    /// Called before the action. Returning `false` skips the action for
    /// this iteration; the post-dispatch hook still runs.
    async fn on_pre_dispatch(
        &mut self,
        _ctx: &DispatchContext<'_>,
        _token: &DispatchToken,
        _response: &mut Response,
    ) -> bireli_http::Result<bool> {
        Ok(true)
    }

    /// Called after the action (or after a skipped action). A returned
    /// token forwards the dispatch loop to another controller/action
    /// without a new client request.
    async fn on_post_dispatch(&mut self) -> bireli_http::Result<Option<DispatchToken>> {
        Ok(None)
    }
}

/// Factory producing a default-initialized controller instance
pub type ControllerFactory = Box<dyn Fn() -> Box<dyn Controller> + Send + Sync>;

struct Registration {
    source: PathBuf,
    factory: ControllerFactory,
}

/// Registry of controller factories keyed by controller identifier
#[derive(Default)]
pub struct ControllerRegistry {
    entries: HashMap<String, Registration>,
}

impl ControllerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a controller factory under `name`, declaring the source
    /// file that provides it.
    ///
    /// Registering the same name again replaces the previous entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use bireli_dispatch::{Controller, ControllerRegistry};
    /// use bireli_http::{Request, Response, RouteParams};
    /// use async_trait::async_trait;
    ///
    /// struct BlogController;
    ///
    /// #[async_trait]
    /// impl Controller for BlogController {
    ///     fn has_action(&self, action: &str) -> bool {
    ///         action == "index"
    ///     }
    ///
    ///     async fn call_action(
    ///         &mut self,
    ///         _action: &str,
    ///         _params: &RouteParams,
    ///         _request: &Request,
    ///         response: &mut Response,
    ///     ) -> bireli_http::Result<()> {
    ///         response.append_body("blog index");
    ///         Ok(())
    ///     }
    /// }
    ///
    /// let mut registry = ControllerRegistry::new();
    /// registry.register("blog", file!(), || Box::new(BlogController));
    /// assert!(registry.contains("blog"));
    /// ```
    pub fn register<F>(&mut self, name: impl Into<String>, source: impl Into<PathBuf>, factory: F)
    where
        F: Fn() -> Box<dyn Controller> + Send + Sync + 'static,
    {
        let name = name.into();
        let source = source.into();

        if self.entries.contains_key(&name) {
            warn!(controller = %name, "replacing existing controller registration");
        }
        info!(
            controller = %name,
            source = %source.display(),
            total_controllers = self.entries.len() + 1,
            "controller registered"
        );

        self.entries.insert(
            name,
            Registration {
                source,
                factory: Box::new(factory),
            },
        );
    }

    /// Whether a controller is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The backing source path declared for `name`
    pub fn source_for(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(|r| r.source.as_path())
    }

    /// Construct a fresh instance of the named controller
    pub fn instantiate(&self, name: &str) -> Option<Box<dyn Controller>> {
        self.entries.get(name).map(|r| (r.factory)())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Construct a fresh controller instance for `token`.
///
/// The token's backing file must exist (checked through `files`, which
/// never loads the file); a missing file fails with
/// [`DispatchError::InvalidController`] before anything else is attempted.
/// In debug mode a present file with no matching registration fails with
/// the [`DispatchError::MissingRegistration`] diagnostic, which
/// distinguishes "file missing" from "file wrong content" when a freshly
/// scaffolded controller was copied but not wired up. Release mode skips
/// that verification and reports the generic construction failure.
pub async fn create_controller_instance(
    token: &DispatchToken,
    registry: &ControllerRegistry,
    files: &FileExistence,
    debug: bool,
) -> Result<Box<dyn Controller>> {
    if !files.controller_file_exists(token.source()).await {
        return Err(DispatchError::InvalidController {
            controller: token.controller().to_string(),
            file: token.source().to_path_buf(),
        });
    }

    match registry.instantiate(token.controller()) {
        Some(instance) => Ok(instance),
        None if debug => Err(DispatchError::MissingRegistration {
            controller: token.controller().to_string(),
            file: token.source().to_path_buf(),
        }),
        None => Err(DispatchError::Construction(token.controller().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bireli_http::RouteParams;

    struct NullController;

    #[async_trait]
    impl Controller for NullController {
        fn has_action(&self, _action: &str) -> bool {
            false
        }

        async fn call_action(
            &mut self,
            _action: &str,
            _params: &RouteParams,
            _request: &Request,
            _response: &mut Response,
        ) -> bireli_http::Result<()> {
            Ok(())
        }
    }

    fn token_for(source: &Path) -> DispatchToken {
        DispatchToken::new("blog", "index", source, RouteParams::new())
    }

    #[test]
    fn test_register_and_instantiate() {
        let mut registry = ControllerRegistry::new();
        registry.register("blog", "app/controllers/blog.rs", || {
            Box::new(NullController)
        });

        assert!(registry.contains("blog"));
        assert_eq!(
            registry.source_for("blog"),
            Some(Path::new("app/controllers/blog.rs"))
        );
        assert!(registry.instantiate("blog").is_some());
        assert!(registry.instantiate("news").is_none());
    }

    #[tokio::test]
    async fn test_missing_file_is_a_resolution_error() {
        let registry = ControllerRegistry::new();
        let files = FileExistence::direct();
        let token = token_for(Path::new("/nonexistent/blog.rs"));

        let err = match create_controller_instance(&token, &registry, &files, true).await {
            Ok(_) => panic!("expected error"),
            Err(e) => e,
        };
        assert!(matches!(err, DispatchError::InvalidController { .. }));
    }

    #[tokio::test]
    async fn test_unregistered_controller_debug_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("blog.rs");
        std::fs::write(&source, "// scaffolded, never registered").unwrap();

        let registry = ControllerRegistry::new();
        let files = FileExistence::direct();
        let token = token_for(&source);

        let err = match create_controller_instance(&token, &registry, &files, true).await {
            Ok(_) => panic!("expected error"),
            Err(e) => e,
        };
        assert!(matches!(err, DispatchError::MissingRegistration { .. }));

        let err = match create_controller_instance(&token, &registry, &files, false).await {
            Ok(_) => panic!("expected error"),
            Err(e) => e,
        };
        assert!(matches!(err, DispatchError::Construction(_)));
    }
}
