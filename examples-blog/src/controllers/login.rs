//! Login screen controller, targeted by internal forwards from guarded
//! actions.

use async_trait::async_trait;
use bireli::{Controller, Request, Response, RouteParams};
use hyper::StatusCode;

/// Backing file declared at registration
pub const SOURCE: &str = file!();

#[derive(Default)]
pub struct LoginController;

#[async_trait]
impl Controller for LoginController {
    fn has_action(&self, action: &str) -> bool {
        action == "index"
    }

    async fn call_action(
        &mut self,
        _action: &str,
        params: &RouteParams,
        _request: &Request,
        response: &mut Response,
    ) -> bireli::http::Result<()> {
        response.set_status(StatusCode::UNAUTHORIZED);
        response.append_body("<h1>Please log in</h1>\n");
        if let Some(id) = params.get_str("id") {
            response.append_body(format!("<p>You were editing post {id}.</p>\n"));
        }
        Ok(())
    }
}
