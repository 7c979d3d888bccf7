//! Tracing output for the hoist binary.
//!
//! `HOIST_LOG` (or `RUST_LOG`) enables a subscriber; `HOIST_LOG_FORMAT`
//! selects its output:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented spans and events via `tracing-tree`
//! - `json`: one JSON object per event
//!
//! ```bash
//! HOIST_LOG=debug HOIST_LOG_FORMAT=tree hoist src/app.routes.ts
//! HOIST_LOG="hoist_lowering=trace" hoist src/app.routes.ts
//! ```
//!
//! Output always goes to stderr so lowered modules on stdout stay clean.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> LogFormat {
        match value.trim().to_lowercase().as_str() {
            "tree" => LogFormat::Tree,
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }

    fn from_env() -> LogFormat {
        LogFormat::parse(&std::env::var("HOIST_LOG_FORMAT").unwrap_or_default())
    }
}

/// `HOIST_LOG` takes precedence over `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(value) = std::env::var("HOIST_LOG") {
        EnvFilter::builder().parse_lossy(value)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Install the global subscriber. Does nothing unless `HOIST_LOG` or
/// `RUST_LOG` is set.
pub fn init_tracing() {
    if std::env::var_os("HOIST_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
