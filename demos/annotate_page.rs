//! Full annotation pass against an in-memory page.
//!
//! Run with: `cargo run --example annotate_page`

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use keymark::{
    Anchor, Document, Error, PageSession, Presenter, RelayBackend, Result, ServiceRelay,
    ACTION_EXTRACT_KEYWORDS, ACTION_GET_EXPLANATION,
};

/// Stand-in for the local extraction/explanation service.
struct LocalBackend;

#[async_trait]
impl RelayBackend for LocalBackend {
    async fn handle(&self, action: &str, payload: Value) -> Result<Value> {
        match action {
            ACTION_EXTRACT_KEYWORDS => Ok(json!({ "keywords": ["ownership", "borrow checker"] })),
            ACTION_GET_EXPLANATION => {
                let keyword = payload
                    .get("keyword")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                Ok(json!({
                    "explanation": format!("'{keyword}' is a core Rust concept.")
                }))
            }
            other => Err(Error::unknown_action(other)),
        }
    }
}

/// Prints explanations instead of rendering a tooltip.
struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn show_explanation(&self, text: &str, anchor: &Anchor) {
        match anchor {
            Anchor::Node(node) => println!("[{node}] {text}"),
            Anchor::Point { x, y } => println!("[{x},{y}] {text}"),
        }
    }

    fn hide(&self) {
        println!("(tooltip hidden)");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keymark=debug".into()),
        )
        .init();

    // Build a small page.
    let doc = Document::new();
    let body = doc.create_element("body");
    doc.append_child(doc.root(), body)?;
    let article = doc.create_element("article");
    let text = doc.create_text(
        "Ownership is enforced by the borrow checker. The borrow checker rejects aliased mutation.",
    );
    doc.append_child(article, text)?;
    doc.append_child(body, article)?;

    // Wire the session to the relayed backend and a console presenter.
    let relay = ServiceRelay::spawn(LocalBackend);
    let session = PageSession::new(doc.clone(), Arc::new(relay), Arc::new(ConsolePresenter));

    let markers = session.annotate().await?;
    println!("inserted {} markers", markers.len());
    println!("{}", doc.outer_html(body)?);

    // Simulate a click on the first marker and a raw text selection.
    if let Some(first) = markers.first() {
        session.activate_marker(*first).await?;
    }
    session.explain_selection("aliased mutation", 120.0, 48.0).await?;
    session.dismiss();

    Ok(())
}
