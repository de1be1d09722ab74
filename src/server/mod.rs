//! Development server with live reload
//!
//! Pages are rendered per request from a fresh fetch of the post source,
//! so edits to posts show up on the next load without a rebuild.

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{header, Request, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::new_debouncer;
use percent_encoding::percent_decode_str;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::content::{find_post, related_posts, BlogPost, PostSource};
use crate::helpers::BLOG_PATH;
use crate::templates::{BLOG_CSS, BLOG_CSS_PATH};
use crate::views::{self, LIST_LOAD_ERROR, POST_LOAD_ERROR};
use crate::{Blog, BlogError};

/// Live reload script injected into HTML pages
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        console.log('Live reload disconnected. Attempting to reconnect...');
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
</body>
"#;

/// Server state
pub struct ServerState {
    /// Current site, replaced when the config file changes
    blog: RwLock<Blog>,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

impl ServerState {
    pub fn new(blog: Blog, live_reload: bool) -> Arc<Self> {
        // Create broadcast channel for live reload notifications
        let (reload_tx, _) = broadcast::channel::<()>(16);
        Arc::new(Self {
            blog: RwLock::new(blog),
            reload_tx,
            live_reload,
        })
    }
}

/// Build the application router
pub fn router(state: Arc<ServerState>) -> Router {
    let mut app = Router::new()
        .route("/", get(|| async { Redirect::temporary(BLOG_PATH) }))
        .route(BLOG_PATH, get(list_handler))
        .route(BLOG_CSS_PATH, get(css_handler));

    if state.live_reload {
        app = app.route("/__livereload", get(livereload_handler));
    }

    app.fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the development server
pub async fn start(blog: &Blog, ip: &str, port: u16, watch: bool, open: bool) -> Result<()> {
    let state = ServerState::new(blog.clone(), watch);
    let app = router(state.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}{}", ip, port, BLOG_PATH);
    println!("Server running at {}", url);
    println!("Serving posts from {}", blog.post_source().describe());
    if watch {
        println!("Live reload enabled. Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    // Open browser if requested
    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    // The debouncer delivers events on a std channel, so the loop blocks
    if watch {
        let base_dir = blog.base_dir.clone();
        let watched = vec![blog.source_dir.clone(), blog.static_dir.clone()];
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(base_dir, watched, state) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Watch for file changes, reload the config and notify browsers
fn watch_and_reload(
    base_dir: PathBuf,
    watched: Vec<PathBuf>,
    state: Arc<ServerState>,
) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid reloads
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for dir in watched.iter().filter(|dir| dir.exists()) {
        debouncer.watcher().watch(dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", dir);
    }

    let config_path = Blog::config_path(&base_dir);
    if let Some(config_path) = &config_path {
        debouncer
            .watcher()
            .watch(config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    // Handle file change events
    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                // Filter out irrelevant events (like .git, .DS_Store, etc.)
                let relevant_events: Vec<_> = events
                    .iter()
                    .filter(|e| {
                        let path_str = e.path.to_string_lossy();
                        !path_str.contains(".git")
                            && !path_str.contains(".DS_Store")
                            && !path_str.ends_with('~')
                    })
                    .collect();

                if relevant_events.is_empty() {
                    continue;
                }

                for event in &relevant_events {
                    tracing::info!("File changed: {}", event.path.display());
                }

                let config_changed = config_path.as_ref().is_some_and(|config| {
                    relevant_events
                        .iter()
                        .any(|e| e.path.file_name() == config.file_name())
                });
                if config_changed {
                    match Blog::new(&base_dir) {
                        Ok(blog) => {
                            *state.blog.blocking_write() = blog;
                            tracing::info!("Reloaded site configuration");
                        }
                        Err(e) => {
                            tracing::error!("Failed to reload configuration: {}", e);
                            continue;
                        }
                    }
                }

                // Notify all connected clients to reload
                let _ = state.reload_tx.send(());
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Fetch every post on the blocking pool
async fn fetch_posts(blog: &Blog) -> crate::Result<Vec<BlogPost>> {
    let source = blog.post_source();
    tracing::debug!("Fetching posts from {}", source.describe());
    tokio::task::spawn_blocking(move || source.get_all_posts())
        .await
        .map_err(|e| BlogError::Render(format!("post fetch task failed: {}", e)))?
}

/// Blog listing
async fn list_handler(State(state): State<Arc<ServerState>>) -> Response {
    let blog = state.blog.read().await.clone();

    match fetch_posts(&blog).await {
        Ok(posts) => html_response(&state, views::list(&blog, &posts), StatusCode::OK),
        Err(e) => {
            tracing::error!("Error fetching blog posts: {}", e);
            html_response(
                &state,
                views::load_error(&blog, LIST_LOAD_ERROR),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}

/// A single post; unknown slugs go back to the listing
async fn post_handler(state: &ServerState, blog: &Blog, slug: &str) -> Response {
    let posts = match fetch_posts(blog).await {
        Ok(posts) => posts,
        Err(e) => {
            tracing::error!("Error fetching blog post {:?}: {}", slug, e);
            return html_response(
                state,
                views::load_error(blog, POST_LOAD_ERROR),
                StatusCode::INTERNAL_SERVER_ERROR,
            );
        }
    };

    let Some(post) = find_post(&posts, slug) else {
        tracing::debug!("No post with slug {:?}, redirecting", slug);
        return Redirect::temporary(BLOG_PATH).into_response();
    };

    let related = related_posts(&posts, slug, blog.config.related_posts);
    html_response(state, views::detail(blog, post, &related), StatusCode::OK)
}

/// Bundled stylesheet
async fn css_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], BLOG_CSS)
}

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

/// Handle WebSocket connection for live reload
async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            // Wait for reload signal
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            // Handle incoming messages (ping/pong)
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Fallback handler: static files first, then posts by slug
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let blog = state.blog.read().await.clone();
    let path = request.uri().path().to_string();

    let mut service = ServeDir::new(&blog.static_dir);
    match service.try_call(request).await {
        Ok(response) if response.status() != StatusCode::NOT_FOUND => {
            return response.into_response();
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!("Failed to serve {}: {}", path, e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response();
        }
    }

    match slug_from_path(&path) {
        Some(slug) => post_handler(&state, &blog, &slug).await,
        None => html_response(&state, views::not_found(&blog), StatusCode::NOT_FOUND),
    }
}

/// The post slug addressed by a single-segment path like `/cost-guide`
fn slug_from_path(path: &str) -> Option<String> {
    let segment = path.strip_prefix('/')?;
    let segment = segment.strip_suffix('/').unwrap_or(segment);
    if segment.is_empty() || segment.contains('/') {
        return None;
    }
    percent_decode_str(segment)
        .decode_utf8()
        .ok()
        .map(|slug| slug.into_owned())
}

/// Turn a rendered view into a response, injecting live reload
fn html_response(state: &ServerState, page: crate::Result<String>, status: StatusCode) -> Response {
    match page {
        Ok(html) => {
            let html = if state.live_reload {
                inject_live_reload(&html)
            } else {
                html
            };
            (status, Html(html)).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to render page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// Inject live reload script into HTML content
fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replace("</body>", LIVE_RELOAD_SCRIPT)
    } else {
        // If no </body> tag, append to end
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_from_path() {
        assert_eq!(slug_from_path("/cost-guide").as_deref(), Some("cost-guide"));
        assert_eq!(slug_from_path("/cost-guide/").as_deref(), Some("cost-guide"));
        assert_eq!(slug_from_path("/caf%C3%A9").as_deref(), Some("café"));
        assert_eq!(slug_from_path("/"), None);
        assert_eq!(slug_from_path("/images/hero.png"), None);
    }

    #[test]
    fn test_inject_live_reload() {
        let html = inject_live_reload("<html><body><p>x</p></body></html>");
        assert!(html.contains("/__livereload"));
        assert!(html.ends_with("</body>\n</html>"));
        assert_eq!(html.matches("</body>").count(), 1);

        let bare = inject_live_reload("<p>x</p>");
        assert!(bare.starts_with("<p>x</p>"));
        assert!(bare.contains("<script>"));
    }
}
