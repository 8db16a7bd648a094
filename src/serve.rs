//! HTTP server for the upload result page
//!
//! `sdmx-filter-ui serve` → starts server, opens browser, shows the page.
//! The page posts each upload result to `/api/render` and writes the
//! returned regions into the DOM by id.

use crate::error::{Error, Result};
use crate::render::{render, RenderedRegions};
use crate::result::{Schema, SchemaHint, UploadResult};
use serde::{Deserialize, Serialize};
use tiny_http::{Header, Method, Request, Response, Server};

// Embed the page directly in the binary
const UI_HTML: &str = include_str!("ui.html");

#[derive(Serialize)]
struct ApiResponse<T> {
    ok: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self { ok: true, data: Some(data), error: None }
    }
}

impl ApiResponse<()> {
    fn failure(error: String) -> Self {
        Self { ok: false, data: None, error: Some(error) }
    }
}

#[derive(Serialize)]
struct RenderReply {
    schema: Schema,
    regions: RenderedRegions,
}

#[derive(Deserialize, Debug)]
struct RenderParams {
    #[serde(default)]
    schema: Option<String>,
}

/// Settings the request handler needs.
#[derive(Debug, Clone, Copy)]
pub struct ServeOptions {
    pub schema: SchemaHint,
    pub fallback: Schema,
}

/// A response ready to send, independent of the socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    fn html(body: String) -> Self {
        Self { status: 200, content_type: "text/html; charset=utf-8", body }
    }

    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        let body = serde_json::to_string(value)
            .unwrap_or_else(|e| format!(r#"{{"ok":false,"data":null,"error":"{}"}}"#, e));
        Self { status, content_type: "application/json", body }
    }

    fn not_found() -> Self {
        Self { status: 404, content_type: "text/plain", body: "Not found".to_string() }
    }
}

/// Start server, open browser, serve the page
pub fn start(host: &str, port: u16, open_browser: bool, opts: ServeOptions) -> Result<()> {
    let addr = format!("{}:{}", host, port);
    let server = Server::http(&addr).map_err(|e| Error::Server(format!("{}: {}", addr, e)))?;

    let url = format!("http://{}:{}", if host == "0.0.0.0" { "localhost" } else { host }, port);

    eprintln!("\n\x1b[1;32mSDG SDMX global filter\x1b[0m");
    eprintln!("   {}\n", url);
    tracing::info!(%addr, schema = %opts.schema, "server listening");

    if open_browser {
        if let Err(e) = open::that(&url) {
            tracing::warn!(error = %e, "could not open browser");
        }
    }

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &opts) {
            tracing::error!(error = %e, "request failed");
        }
    }

    Ok(())
}

fn handle_request(mut request: Request, opts: &ServeOptions) -> std::io::Result<()> {
    let method = request.method().clone();
    let url = request.url().to_string();

    let mut body = Vec::new();
    if method == Method::Post {
        request.as_reader().read_to_end(&mut body)?;
    }

    let reply = route(&method, &url, &body, opts);
    tracing::debug!(?method, %url, status = reply.status, "handled request");

    let mut response = Response::from_string(reply.body).with_status_code(reply.status);
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes()) {
        response = response.with_header(header);
    }
    request.respond(response)
}

/// Map a request to its reply.
pub fn route(method: &Method, url: &str, body: &[u8], opts: &ServeOptions) -> Reply {
    let mut parts = url.splitn(2, '?');
    let path = parts.next().unwrap_or("/");
    let query = parts.next().unwrap_or("");

    match (method, path) {
        (&Method::Get, "/") => Reply::html(UI_HTML.to_string()),

        (&Method::Get, "/api/health") => Reply::json(200, &ApiResponse::success("ok")),

        (&Method::Post, "/api/render") => match render_body(query, body, opts) {
            Ok(reply) => Reply::json(200, &ApiResponse::success(reply)),
            Err(e) => {
                tracing::warn!(error = %e, "rejected upload result");
                Reply::json(400, &ApiResponse::<()>::failure(e.to_string()))
            }
        },

        _ => Reply::not_found(),
    }
}

fn render_body(query: &str, body: &[u8], opts: &ServeOptions) -> Result<RenderReply> {
    let params: RenderParams =
        serde_urlencoded::from_str(query).map_err(|e| Error::Query(e.to_string()))?;
    let hint = match params.schema.as_deref() {
        Some(s) if !s.is_empty() => s.parse()?,
        _ => opts.schema,
    };

    let result = UploadResult::from_slice(body, hint, opts.fallback)?;
    let regions = render(&result);
    Ok(RenderReply { schema: regions.schema(), regions })
}
