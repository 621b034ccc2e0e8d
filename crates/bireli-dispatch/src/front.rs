//! Front controller and the forwarding dispatch loop.

use crate::config::DispatchConfig;
use crate::controller::{create_controller_instance, ControllerRegistry};
use crate::fallback;
use crate::files::FileExistence;
use crate::resolver::Dispatcher;
use crate::token::DispatchToken;
use crate::{DispatchError, Result};
use async_trait::async_trait;
use bireli_cache::Cache;
use bireli_http::{Extensions, Request, Response};
use bireli_urls::{Route, Router};
use std::sync::Arc;
use tracing::{debug, info};

/// Borrowed collaborators visible to every hook in one dispatch.
///
/// The bootstrap context is opaque to the core; it is passed through
/// untouched. The route is the originally matched route and stays the same
/// across internal forwards.
pub struct DispatchContext<'a> {
    pub request: &'a Request,
    pub bootstrap: &'a Extensions,
    pub router: &'a dyn Router,
    pub dispatcher: &'a Dispatcher,
    pub route: &'a Route,
}

/// Cross-cutting hooks wrapped around every controller invocation.
///
/// Applications supply a policy object instead of subclassing the front
/// controller; all methods default to pass-through, so a policy only
/// implements the hooks it cares about.
#[async_trait]
pub trait DispatchPolicy: Send + Sync {
    /// Called before each iteration. Returning `false` vetoes the
    /// iteration: no controller is instantiated, and the pending token is
    /// cleared so a standing veto cannot spin the loop forever. The
    /// response accumulated so far is retained.
    async fn on_pre_dispatch(
        &self,
        _ctx: &DispatchContext<'_>,
        _token: &DispatchToken,
        _response: &mut Response,
    ) -> bireli_http::Result<bool> {
        Ok(true)
    }

    /// Called after each iteration with the controller's forwarding
    /// candidate (or `None`). May substitute a different token; whatever
    /// it returns drives the next iteration.
    async fn on_post_dispatch(
        &self,
        _ctx: &DispatchContext<'_>,
        candidate: Option<DispatchToken>,
        _response: &mut Response,
    ) -> bireli_http::Result<Option<DispatchToken>> {
        Ok(candidate)
    }

    /// Called once on the accumulated response after the loop terminates
    async fn filter_response(&self, response: Response) -> bireli_http::Result<Response> {
        Ok(response)
    }
}

/// Pass-through policy used when the application supplies none
pub struct DefaultPolicy;

#[async_trait]
impl DispatchPolicy for DefaultPolicy {}

/// The single entry point wrapping every controller invocation.
///
/// Owns the dispatch loop; borrows the router, dispatcher and bootstrap
/// context for the duration of one [`dispatch`](FrontController::dispatch)
/// call.
pub struct FrontController {
    registry: Arc<ControllerRegistry>,
    policy: Arc<dyn DispatchPolicy>,
    cache: Option<Arc<dyn Cache>>,
    config: DispatchConfig,
}

impl FrontController {
    /// Create a front controller over a registry, with a pass-through
    /// policy, no file-existence cache, and default configuration
    pub fn new(registry: Arc<ControllerRegistry>) -> Self {
        Self {
            registry,
            policy: Arc::new(DefaultPolicy),
            cache: None,
            config: DispatchConfig::default(),
        }
    }

    /// Install a cross-cutting dispatch policy
    pub fn with_policy(mut self, policy: Arc<dyn DispatchPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Memoize backing-file existence checks through `cache`
    pub fn with_file_cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// The file-existence check this front controller dispatches with;
    /// also usable by diagnostics and admin tooling
    pub fn file_existence(&self) -> FileExistence {
        match &self.cache {
            Some(cache) => FileExistence::cached(cache.clone(), self.config.file_check_ttl()),
            None => FileExistence::direct(),
        }
    }

    /// Probe for a convention-based route when no named route matched
    /// (see [`fallback::direct_route`])
    pub async fn direct_route(&self, request: &Request, dispatcher: &Dispatcher) -> Option<Route> {
        fallback::direct_route(request, dispatcher, &self.file_existence()).await
    }

    /// Run the dispatch loop for one client-visible request.
    ///
    /// A fresh controller instance is created per iteration, the action is
    /// invoked between its controller-level hooks, and any forwarding
    /// token produced by the controller (and possibly substituted by the
    /// policy) continues the loop. A single [`Response`] accumulates
    /// across all iterations and is returned after the policy's
    /// response filter.
    ///
    /// Loop termination is entirely in the hands of the hooks: the loop
    /// runs until no forwarding token remains. With
    /// `DispatchConfig::max_forwards` unset there is no cycle detection.
    ///
    /// Errors (resolution failures, unknown actions, and anything raised
    /// by hooks or actions) abort the dispatch and propagate to the
    /// caller; no response is emitted on failure.
    pub async fn dispatch(
        &self,
        request: &Request,
        bootstrap: &Extensions,
        router: &dyn Router,
        dispatcher: &Dispatcher,
        route: &Route,
        token: DispatchToken,
    ) -> Result<Response> {
        let ctx = DispatchContext {
            request,
            bootstrap,
            router,
            dispatcher,
            route,
        };
        let files = self.file_existence();

        info!(
            controller = %token.controller(),
            action = %token.action(),
            path = %request.path(),
            "dispatch start"
        );

        let mut response = Response::ok();
        let mut current = token;
        let mut forwards = 0usize;
        let mut iterations = 0usize;

        loop {
            iterations += 1;
            debug!(
                iteration = iterations,
                controller = %current.controller(),
                action = %current.action(),
                "dispatch iteration"
            );

            let candidate = if self
                .policy
                .on_pre_dispatch(&ctx, &current, &mut response)
                .await?
            {
                let mut controller =
                    create_controller_instance(&current, &self.registry, &files, self.config.debug)
                        .await?;

                if !controller.has_action(current.action()) {
                    return Err(DispatchError::InvalidAction {
                        controller: current.controller().to_string(),
                        action: current.action().to_string(),
                    });
                }

                let run_action = controller
                    .on_pre_dispatch(&ctx, &current, &mut response)
                    .await?;
                if run_action {
                    controller
                        .call_action(current.action(), current.params(), request, &mut response)
                        .await?;
                } else {
                    debug!(
                        controller = %current.controller(),
                        action = %current.action(),
                        "action skipped by controller pre-dispatch"
                    );
                }

                controller.on_post_dispatch().await?
            } else {
                debug!(
                    controller = %current.controller(),
                    action = %current.action(),
                    "iteration vetoed by policy pre-dispatch"
                );
                None
            };

            match self
                .policy
                .on_post_dispatch(&ctx, candidate, &mut response)
                .await?
            {
                Some(next) => {
                    forwards += 1;
                    if let Some(limit) = self.config.max_forwards
                        && forwards > limit
                    {
                        return Err(DispatchError::ForwardLimit(limit));
                    }
                    debug!(
                        from_controller = %current.controller(),
                        to_controller = %next.controller(),
                        to_action = %next.action(),
                        "forwarding"
                    );
                    current = next;
                }
                None => break,
            }
        }

        let response = self.policy.filter_response(response).await?;

        info!(
            status = response.status.as_u16(),
            iterations = iterations,
            "dispatch complete"
        );
        Ok(response)
    }
}
