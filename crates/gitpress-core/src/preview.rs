//! Local HTTP preview of a built site.
//!
//! Serves files from an explicit root directory: `index.html` answers for
//! directories, and directories without one get an HTML listing. The server
//! blocks the calling thread on a current-thread tokio runtime until Ctrl-C.

use std::future::Future;
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use axum::extract::{Request, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::{Error, Result};

/// Host bound when none is given.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Port bound when none is given.
pub const DEFAULT_PORT: u16 = 5000;

/// Characters escaped in listing links (RFC 3986 unreserved are kept).
const LINK_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A local file server rooted at a built site.
#[derive(Debug, Clone)]
pub struct PreviewServer {
    root: PathBuf,
    host: String,
    port: u16,
}

impl PreviewServer {
    /// Create a server for `root`, defaulting to `127.0.0.1:5000`.
    pub fn new(root: impl Into<PathBuf>, host: Option<&str>, port: Option<u16>) -> Self {
        Self {
            root: root.into(),
            host: host.unwrap_or(DEFAULT_HOST).to_string(),
            port: port.unwrap_or(DEFAULT_PORT),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `host:port` as requested.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The HTTP router serving the site.
    pub fn router(&self) -> Router {
        Router::new()
            .fallback(serve_path)
            .with_state(Arc::new(self.root.clone()))
            .layer(TraceLayer::new_for_http())
    }

    /// Serve until the process is interrupted.
    ///
    /// Prints `Serving on http://host:port/` once the socket is bound.
    pub fn serve(&self) -> Result<()> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        runtime.block_on(self.serve_until(shutdown_signal(), |addr| {
            println!(" * Serving on http://{addr}/");
        }))
    }

    /// Bind, call `on_ready` with the bound address, then serve until
    /// `shutdown` completes.
    pub async fn serve_until<S, R>(&self, shutdown: S, on_ready: R) -> Result<()>
    where
        S: Future<Output = ()> + Send + 'static,
        R: FnOnce(SocketAddr),
    {
        let address = self.address();
        let serve_error = |source| Error::Serve {
            address: address.clone(),
            source,
        };

        let listener = tokio::net::TcpListener::bind((self.host.as_str(), self.port))
            .await
            .map_err(serve_error)?;
        let bound = listener.local_addr().map_err(serve_error)?;

        tracing::info!(address = %bound, root = %self.root.display(), "Serving preview");
        on_ready(bound);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(serve_error)
    }
}

/// Wait for Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C; serving until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping preview");
}

/// Serve a file or `index.html`, falling back to a directory listing.
async fn serve_path(State(root): State<Arc<PathBuf>>, request: Request) -> Response {
    let uri = request.uri().clone();
    let files = ServeDir::new(root.as_path()).append_index_html_on_directories(true);
    match files.oneshot(request).await {
        Ok(response) if response.status() != StatusCode::NOT_FOUND => response.into_response(),
        Ok(_) => directory_listing(&root, &uri).await,
        Err(never) => match never {},
    }
}

/// Render a listing for directories without an `index.html`.
async fn directory_listing(root: &Path, uri: &Uri) -> Response {
    let Ok(decoded) = percent_decode_str(uri.path()).decode_utf8() else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let relative = Path::new(decoded.trim_start_matches('/'));
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return StatusCode::NOT_FOUND.into_response();
    }

    let directory = root.join(relative);
    let mut entries = match tokio::fs::read_dir(&directory).await {
        Ok(entries) => entries,
        Err(_) => return StatusCode::NOT_FOUND.into_response(),
    };

    let mut names = Vec::new();
    loop {
        match entries.next_entry().await {
            Ok(Some(entry)) => {
                let Ok(name) = entry.file_name().into_string() else {
                    continue;
                };
                let is_dir = entry.file_type().await.is_ok_and(|t| t.is_dir());
                names.push((name, is_dir));
            }
            Ok(None) => break,
            Err(e) => {
                tracing::debug!(directory = %directory.display(), error = %e, "Listing failed");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        }
    }
    names.sort();

    Html(render_listing(&decoded, &names)).into_response()
}

fn render_listing(title: &str, entries: &[(String, bool)]) -> String {
    let title = escape_html(title);
    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Directory listing for {title}</title>\n</head>\n<body>\n\
         <h1>Directory listing for {title}</h1>\n<hr>\n<ul>\n"
    );
    for (name, is_dir) in entries {
        let suffix = if *is_dir { "/" } else { "" };
        html.push_str(&format!(
            "<li><a href=\"{}{suffix}\">{}{suffix}</a></li>\n",
            utf8_percent_encode(name, LINK_SEGMENT),
            escape_html(name),
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}
