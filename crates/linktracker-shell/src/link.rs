//! Shell handlers for the link commands.
//!
//! | Action       | Params           | Success payload                    |
//! |--------------|------------------|------------------------------------|
//! | `CREATE`     | `link, password` | `{id}`                             |
//! | `REDIRECT`   | `id, password`   | `{msg: "Redirecting to:<url>"}`    |
//! | `METRICS`    | `id`             | `{id, url, count, inactive}`       |
//! | `INACTIVATE` | `id`             | `{msg: "Link: <id> deleted"}`      |

use crate::error::{Result, ShellError};
use crate::handler::Handler;
use crate::request::{Request, Response};
use crate::shell::Shell;
use async_trait::async_trait;
use linktracker_core::{LinkId, LinkService};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};

pub const CREATE: &str = "CREATE";
pub const REDIRECT: &str = "REDIRECT";
pub const METRICS: &str = "METRICS";
pub const INACTIVATE: &str = "INACTIVATE";

/// Builds the link handlers around a shared [`LinkService`].
#[derive(Debug)]
pub struct LinkHandlers<S> {
    service: Arc<S>,
}

impl<S> Clone for LinkHandlers<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<S: LinkService> LinkHandlers<S> {
    pub fn new(service: S) -> Self {
        Self::from_arc(Arc::new(service))
    }

    pub fn from_arc(service: Arc<S>) -> Self {
        Self { service }
    }

    pub fn create(&self) -> Create<S> {
        Create(Arc::clone(&self.service))
    }

    pub fn redirect(&self) -> Redirect<S> {
        Redirect(Arc::clone(&self.service))
    }

    pub fn metrics(&self) -> Metrics<S> {
        Metrics(Arc::clone(&self.service))
    }

    pub fn inactivate(&self) -> Inactivate<S> {
        Inactivate(Arc::clone(&self.service))
    }

    /// Registers all four link actions on `shell`.
    pub fn register<R, W>(&self, shell: &mut Shell<R, W>)
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin,
    {
        shell.add_handler(CREATE, self.create());
        shell.add_handler(REDIRECT, self.redirect());
        shell.add_handler(METRICS, self.metrics());
        shell.add_handler(INACTIVATE, self.inactivate());
    }
}

fn require<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(ShellError::validation(format!("{} is missing", field)));
    }
    Ok(value)
}

fn parse_id(raw: &str) -> Result<LinkId> {
    let raw = require(raw, "id")?;
    match raw.parse::<LinkId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ShellError::validation(format!("invalid id: {}", raw))),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CreateRequest {
    link: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct CreateResponse {
    id: LinkId,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RedirectRequest {
    id: String,
    password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IdRequest {
    id: String,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    msg: String,
}

#[derive(Debug, Serialize)]
struct MetricsResponse<'a> {
    id: LinkId,
    url: &'a str,
    count: u64,
    inactive: bool,
}

/// `CREATE link:<url> password:<secret>`
pub struct Create<S>(Arc<S>);

#[async_trait]
impl<S: LinkService> Handler for Create<S> {
    async fn handle(&self, req: Request) -> Result<Response> {
        let r: CreateRequest = req.decode()?;
        let url = require(&r.link, "link")?;
        let password = require(&r.password, "password")?;

        let link = self.0.create(url, password).await?;

        Response::respond(req.context(), &CreateResponse { id: link.id })
    }
}

/// `REDIRECT id:<id> password:<secret>`
pub struct Redirect<S>(Arc<S>);

#[async_trait]
impl<S: LinkService> Handler for Redirect<S> {
    async fn handle(&self, req: Request) -> Result<Response> {
        let r: RedirectRequest = req.decode()?;
        let id = parse_id(&r.id)?;
        let password = require(&r.password, "password")?;

        let link = self.0.redirect(id, password).await?;

        let msg = format!("Redirecting to:{}", link.url);
        Response::respond(req.context(), &MessageResponse { msg })
    }
}

/// `METRICS id:<id>`
pub struct Metrics<S>(Arc<S>);

#[async_trait]
impl<S: LinkService> Handler for Metrics<S> {
    async fn handle(&self, req: Request) -> Result<Response> {
        let r: IdRequest = req.decode()?;
        let id = parse_id(&r.id)?;

        let link = self.0.find_by_id(id).await?;

        Response::respond(
            req.context(),
            &MetricsResponse {
                id: link.id,
                url: &link.url,
                count: link.redirect_count,
                inactive: link.inactive,
            },
        )
    }
}

/// `INACTIVATE id:<id>`
pub struct Inactivate<S>(Arc<S>);

#[async_trait]
impl<S: LinkService> Handler for Inactivate<S> {
    async fn handle(&self, req: Request) -> Result<Response> {
        let r: IdRequest = req.decode()?;
        let id = parse_id(&r.id)?;

        self.0.inactivate(id).await?;

        let msg = format!("Link: {} deleted", id);
        Response::respond(req.context(), &MessageResponse { msg })
    }
}
