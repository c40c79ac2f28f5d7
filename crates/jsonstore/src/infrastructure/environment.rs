//! Captures the process environment into an [`Environment`] value.
//!
//! This is the only place jsonstore reads environment variables.  It is
//! called once when an `AppStore` is created; the result is passed to the
//! pure resolver in `jsonstore_core::platform` and never re-read.
//!
//! | Variable          | Used for                                        |
//! |-------------------|-------------------------------------------------|
//! | `APP_ENV`         | `production` selects the production directory   |
//! | `HOME`            | base for macOS/Linux (and Windows fallback)     |
//! | `USERPROFILE`     | Windows home directory                          |
//! | `APPDATA`         | Windows roaming application data                |
//! | `XDG_CONFIG_HOME` | Linux config base, when absolute                |

use std::path::PathBuf;

use jsonstore_core::{Environment, Platform};

/// Names the deployment environment; `production` (any case) means production.
pub const APP_ENV_VAR: &str = "APP_ENV";

/// Reads the current process environment.
///
/// When `APP_ENV` is unset, release builds count as production and debug
/// builds as development.
pub fn process_environment() -> Environment {
    let platform = Platform::current();
    let home_dir = match platform {
        Platform::Windows => env_path("USERPROFILE").or_else(|| env_path("HOME")),
        _ => env_path("HOME"),
    };
    let app_env = std::env::var(APP_ENV_VAR).ok();

    Environment {
        platform,
        is_production: production_flag(app_env.as_deref()),
        home_dir,
        app_data: env_path("APPDATA"),
        xdg_config_home: env_path("XDG_CONFIG_HOME"),
    }
}

fn production_flag(app_env: Option<&str>) -> bool {
    match app_env {
        Some(value) => value.trim().eq_ignore_ascii_case("production"),
        None => !cfg!(debug_assertions),
    }
}

/// A non-empty environment variable as a path.
fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
