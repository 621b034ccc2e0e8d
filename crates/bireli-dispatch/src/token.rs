//! Dispatch tokens.

use bireli_http::RouteParams;
use std::path::{Path, PathBuf};

/// Immutable descriptor of one controller invocation.
///
/// Produced by the [`Dispatcher`](crate::Dispatcher) from a matched route
/// and consumed within a single iteration of the dispatch loop. Hooks that
/// want to continue the loop construct a *new* token; an existing token is
/// never mutated or reused.
#[derive(Debug, Clone)]
pub struct DispatchToken {
    controller: String,
    action: String,
    source: PathBuf,
    params: RouteParams,
}

impl DispatchToken {
    /// Create a token for the given controller/action pair
    ///
    /// # Examples
    ///
    /// ```
    /// use bireli_dispatch::DispatchToken;
    /// use bireli_http::RouteParams;
    ///
    /// let token = DispatchToken::new("blog", "show", "app/controllers/blog.rs", RouteParams::new());
    /// assert_eq!(token.controller(), "blog");
    /// assert_eq!(token.action(), "show");
    /// ```
    pub fn new(
        controller: impl Into<String>,
        action: impl Into<String>,
        source: impl Into<PathBuf>,
        params: RouteParams,
    ) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
            source: source.into(),
            params,
        }
    }

    /// Controller identifier
    pub fn controller(&self) -> &str {
        &self.controller
    }

    /// Action identifier
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Path of the backing file expected to provide the controller
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Ordered invocation parameters
    pub fn params(&self) -> &RouteParams {
        &self.params
    }
}
