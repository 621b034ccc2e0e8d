//! Application dispatch policy.

use async_trait::async_trait;
use bireli::dispatch::DispatchContext;
use bireli::{DispatchPolicy, DispatchToken, Response};
use tracing::info;

/// Logs every iteration and stamps the outgoing response
pub struct BlogPolicy;

#[async_trait]
impl DispatchPolicy for BlogPolicy {
    async fn on_pre_dispatch(
        &self,
        ctx: &DispatchContext<'_>,
        token: &DispatchToken,
        _response: &mut Response,
    ) -> bireli::http::Result<bool> {
        info!(
            path = %ctx.request.path(),
            controller = %token.controller(),
            action = %token.action(),
            "dispatching"
        );
        Ok(true)
    }

    async fn filter_response(&self, response: Response) -> bireli::http::Result<Response> {
        Ok(response.with_header("x-powered-by", "bireli"))
    }
}
