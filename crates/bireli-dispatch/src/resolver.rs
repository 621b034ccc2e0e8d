//! Route-to-token resolution.

use crate::controller::ControllerRegistry;
use crate::token::DispatchToken;
use crate::{DispatchError, Result};
use bireli_urls::Route;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Resolves a matched [`Route`] into a concrete [`DispatchToken`].
///
/// A registered controller resolves to its declared backing source path;
/// an unregistered one resolves by naming convention to
/// `<controllers_dir>/<name>.rs`, so the direct-route fallback can probe
/// for controllers that exist on disk without being wired up yet.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ControllerRegistry>,
    controllers_dir: PathBuf,
}

impl Dispatcher {
    /// Create a dispatcher over a registry and a conventional controllers
    /// directory
    ///
    /// # Examples
    ///
    /// ```
    /// use bireli_dispatch::{ControllerRegistry, Dispatcher};
    /// use bireli_urls::Route;
    /// use std::sync::Arc;
    ///
    /// let dispatcher = Dispatcher::new(Arc::new(ControllerRegistry::new()), "app/controllers");
    /// let token = dispatcher.resolve(&Route::new("blog", "index")).unwrap();
    /// assert_eq!(token.source(), std::path::Path::new("app/controllers/blog.rs"));
    /// ```
    pub fn new(registry: Arc<ControllerRegistry>, controllers_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            controllers_dir: controllers_dir.into(),
        }
    }

    /// The registry this dispatcher resolves against
    pub fn registry(&self) -> &ControllerRegistry {
        &self.registry
    }

    /// Resolve a route into a dispatch token.
    ///
    /// Fails when the route carries an empty controller or action
    /// identifier.
    pub fn resolve(&self, route: &Route) -> Result<DispatchToken> {
        if !route.is_dispatchable() {
            return Err(DispatchError::InvalidRoute(format!(
                "controller '{}' / action '{}' must both be non-empty",
                route.controller(),
                route.action()
            )));
        }

        let source = self
            .registry
            .source_for(route.controller())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| {
                self.controllers_dir
                    .join(format!("{}.rs", route.controller()))
            });

        debug!(
            controller = %route.controller(),
            action = %route.action(),
            source = %source.display(),
            "route resolved"
        );

        Ok(DispatchToken::new(
            route.controller(),
            route.action(),
            source,
            route.params().clone(),
        ))
    }
}
