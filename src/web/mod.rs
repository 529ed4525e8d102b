//! Web front end: a single add-relationship form plus the two tree actions.
//!
//! Every successful add is persisted immediately; the family graph is rebuilt
//! from the store on each "Show Family Tree" request.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::{FamtreeError, Result};
use crate::extract::extract_relationships;
use crate::graph::{build_family_graph, render_dot};
use crate::store::{self, FamilyTree, SiblingPair};

/// Web server wrapper
pub struct WebServer {
    config: Config,
}

impl WebServer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the web server until shutdown.
    pub async fn run(&self) -> Result<()> {
        let tree = store::load(self.config.store_path())?;
        let siblings = if self.config.store.persist_siblings {
            store::load_siblings(self.config.store_path())?
        } else {
            Vec::new()
        };
        log::info!(
            "Loaded {} saved records from {}",
            tree.len(),
            self.config.store_path().display()
        );

        let state = AppState {
            tree: Arc::new(Mutex::new(tree)),
            siblings: Arc::new(Mutex::new(siblings)),
            config: self.config.clone(),
        };
        let app = create_router(state);

        let addr = format!("127.0.0.1:{}", self.config.http_server.port);
        log::info!("Starting family tree web server on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
            FamtreeError::Io(std::io::Error::new(
                std::io::ErrorKind::AddrInUse,
                format!("Failed to bind to {}: {}", addr, e),
            ))
        })?;

        axum::serve(listener, app).await.map_err(|e| {
            FamtreeError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("HTTP server error: {}", e),
            ))
        })?;

        Ok(())
    }
}

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    tree: Arc<Mutex<FamilyTree>>,
    siblings: Arc<Mutex<Vec<SiblingPair>>>,
    config: Config,
}

/// Build the axum router.
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/add", post(handle_add))
        .route("/tree", get(handle_tree))
        .route("/reset", post(handle_reset))
        .route("/health", get(handle_health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

#[derive(Deserialize)]
struct AddForm {
    sentence: String,
}

async fn handle_index() -> Html<String> {
    Html(render_page(None, None))
}

async fn handle_add(
    State(state): State<AppState>,
    Form(form): Form<AddForm>,
) -> std::result::Result<Html<String>, (StatusCode, String)> {
    let sentence = form.sentence.trim();
    if sentence.is_empty() {
        return Ok(Html(render_page(
            Some(("Enter a relationship sentence first.", NoticeKind::Warning)),
            None,
        )));
    }

    let Some(relation) = extract_relationships(sentence) else {
        log::warn!("Could not extract a relationship from: {}", sentence);
        return Ok(Html(render_page(
            Some((
                "Could not understand the relationship. Try again!",
                NoticeKind::Warning,
            )),
            None,
        )));
    };

    let mut notices = Vec::new();

    if let Some((s1, s2)) = relation.sibling_pair() {
        let mut siblings = state.siblings.lock().await;
        store::record_sibling(&mut siblings, (s1.clone(), s2.clone()));
        if state.config.store.persist_siblings {
            store::save_siblings(state.config.store_path(), &siblings)
                .map_err(internal_error)?;
        }
        notices.push(format!("Added sibling relationship: {} and {}", s1, s2));
    }

    if let Some(child) = relation.child.clone() {
        let mut tree = state.tree.lock().await;
        store::upsert(
            &mut tree,
            &child,
            relation.father.as_deref(),
            relation.mother.as_deref(),
        );
        store::save(state.config.store_path(), &tree).map_err(internal_error)?;
        notices.push(format!("Added relationship for {}", child));
    }

    let notice = notices.join("; ");
    Ok(Html(render_page(
        Some((&notice, NoticeKind::Success)),
        None,
    )))
}

async fn handle_tree(State(state): State<AppState>) -> Html<String> {
    let tree = state.tree.lock().await;
    let siblings = state.siblings.lock().await;

    if tree.is_empty() && siblings.is_empty() {
        return Html(render_page(
            Some(("No relationships added yet.", NoticeKind::Info)),
            None,
        ));
    }

    let graph = build_family_graph(&tree, &siblings);
    let dot = render_dot(&graph);
    Html(render_page(None, Some(&dot)))
}

async fn handle_reset(
    State(state): State<AppState>,
) -> std::result::Result<Html<String>, (StatusCode, String)> {
    store::reset(state.config.store_path()).map_err(internal_error)?;
    state.tree.lock().await.clear();
    state.siblings.lock().await.clear();
    log::info!("All family tree data cleared");
    Ok(Html(render_page(
        Some(("All data cleared.", NoticeKind::Warning)),
        None,
    )))
}

async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

fn internal_error(e: FamtreeError) -> (StatusCode, String) {
    log::error!("Request failed: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

enum NoticeKind {
    Success,
    Warning,
    Info,
}

impl NoticeKind {
    fn css_class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Warning => "warning",
            NoticeKind::Info => "info",
        }
    }
}

/// Minimal HTML escaping for user-derived text placed into the page.
fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the single-page UI: form, action buttons, optional notice, and the
/// DOT source of the current tree when requested.
fn render_page(notice: Option<(&str, NoticeKind)>, dot: Option<&str>) -> String {
    let notice_html = notice
        .map(|(text, kind)| {
            format!(
                r#"<p class="notice {}">{}</p>"#,
                kind.css_class(),
                html_escape(text)
            )
        })
        .unwrap_or_default();

    let tree_html = dot
        .map(|d| format!("<h2>Family Tree (DOT)</h2><pre>{}</pre>", html_escape(d)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Family Tree Builder</title>
<style>
  body {{ font-family: sans-serif; max-width: 640px; margin: 2em auto; }}
  .notice.success {{ color: #1a7f37; }}
  .notice.warning {{ color: #9a6700; }}
  .notice.info {{ color: #0969da; }}
  pre {{ background: #f6f8fa; padding: 1em; overflow-x: auto; }}
  input[type=text] {{ width: 70%; }}
</style>
</head>
<body>
<h1>Family Tree Builder</h1>
<p>Enter relationships like <code>Abhay's father is Raj</code>.</p>
{notice}
<form method="post" action="/add">
  <input type="text" name="sentence" placeholder="Add a relationship...">
  <button type="submit">Add</button>
</form>
<form method="get" action="/tree" style="display:inline">
  <button type="submit">Show Family Tree</button>
</form>
<form method="post" action="/reset" style="display:inline">
  <button type="submit">Reset All Data</button>
</form>
{tree}
</body>
</html>"#,
        notice = notice_html,
        tree = tree_html,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }

    #[test]
    fn test_render_page_plain() {
        let page = render_page(None, None);
        assert!(page.contains("Family Tree Builder"));
        assert!(page.contains(r#"action="/add""#));
        assert!(page.contains("Show Family Tree"));
        assert!(page.contains("Reset All Data"));
        assert!(!page.contains("class=\"notice"));
    }

    #[test]
    fn test_render_page_with_notice() {
        let page = render_page(Some(("Added relationship for Abhay", NoticeKind::Success)), None);
        assert!(page.contains("Added relationship for Abhay"));
        assert!(page.contains("notice success"));
    }

    #[test]
    fn test_render_page_with_dot() {
        let page = render_page(None, Some("digraph {\n}"));
        assert!(page.contains("<pre>digraph"));
    }

    #[test]
    fn test_create_router_builds() {
        let state = AppState {
            tree: Arc::new(Mutex::new(FamilyTree::new())),
            siblings: Arc::new(Mutex::new(Vec::new())),
            config: Config::default(),
        };
        let _router = create_router(state);
    }
}
