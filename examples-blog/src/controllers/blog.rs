//! Blog controller: listing and detail pages, with a login forward for
//! unauthenticated edit requests.

use async_trait::async_trait;
use bireli::dispatch::DispatchContext;
use bireli::{Controller, DispatchToken, Request, Response, RouteParams};

/// Backing file declared at registration
pub const SOURCE: &str = file!();

pub struct BlogController {
    forward: Option<DispatchToken>,
}

impl BlogController {
    pub fn new() -> Self {
        Self { forward: None }
    }
}

impl Default for BlogController {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Controller for BlogController {
    fn has_action(&self, action: &str) -> bool {
        matches!(action, "index" | "show" | "edit")
    }

    async fn call_action(
        &mut self,
        action: &str,
        params: &RouteParams,
        _request: &Request,
        response: &mut Response,
    ) -> bireli::http::Result<()> {
        match action {
            "index" => {
                response.append_body("<h1>All posts</h1>\n");
            }
            "show" => {
                let id = params.get_str("id").unwrap_or("?");
                response.append_body(format!("<h1>Post {id}</h1>\n"));
            }
            "edit" => {
                let id = params.get_str("id").unwrap_or("?");
                response.append_body(format!("<h1>Editing post {id}</h1>\n"));
            }
            _ => unreachable!("has_action gates the action names"),
        }
        Ok(())
    }

    async fn on_pre_dispatch(
        &mut self,
        ctx: &DispatchContext<'_>,
        token: &DispatchToken,
        _response: &mut Response,
    ) -> bireli::http::Result<bool> {
        // Editing requires a token; everything else is public. The skipped
        // action is replaced by a forward to the login screen.
        if token.action() == "edit" && !ctx.request.query_params.contains_key("token") {
            self.forward = Some(DispatchToken::new(
                "login",
                "index",
                super::login::SOURCE,
                token.params().clone(),
            ));
            return Ok(false);
        }
        Ok(true)
    }

    async fn on_post_dispatch(&mut self) -> bireli::http::Result<Option<DispatchToken>> {
        Ok(self.forward.take())
    }
}
