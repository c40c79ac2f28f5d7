//! Demonstrates a typed preferences file in the application data directory.
//!
//! ```bash
//! RUST_LOG=debug cargo run --package jsonstore --example preferences
//! ```
//!
//! In a debug build (and without `APP_ENV=production`) the file lands in the
//! `jsonstore-demo (development)` directory, leaving any release data alone.

use jsonstore::{AppStore, TypedSchema};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Theme {
    Light,
    Dark,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Window {
    width: u32,
    height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Preferences {
    theme: Theme,
    font_size: u8,
    window: Window,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            font_size: 14,
            window: Window {
                width: 1280,
                height: 800,
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let schema = TypedSchema::<Preferences>::new().check(|p| {
        if (8..=72).contains(&p.font_size) {
            Ok(())
        } else {
            Err(format!("font size {} is outside 8..=72", p.font_size))
        }
    });

    let app = AppStore::from_process_env("jsonstore-demo")?;
    let prefs = app.open("preferences.json", schema, Preferences::default())?;
    info!("using {}", prefs.path().display());

    let current = prefs.read().await?;
    info!("current preferences: {current:?}");

    prefs
        .update(&json!({ "theme": "dark", "window": { "width": 1440 } }))
        .await?;
    info!("after update: {:?}", prefs.read().await?);

    match prefs.update(&json!({ "font_size": 200 })).await {
        Ok(()) => info!("unexpectedly accepted font size 200"),
        Err(e) => info!("rejected invalid update: {e}"),
    }

    Ok(())
}
