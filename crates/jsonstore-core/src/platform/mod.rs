//! Per-application data directory resolution.
//!
//! Resolves where an application's store files live:
//! - Windows:  `%APPDATA%\<app>`
//! - macOS:    `~/Library/Application Support/<app>`
//! - Linux:    `$XDG_CONFIG_HOME/<app>` or `~/.config/<app>`
//!
//! Outside production the directory name gets a ` (development)` suffix so a
//! development build never touches the settings of an installed release.
//!
//! Nothing here reads the process environment.  The caller captures an
//! [`Environment`] once (see `jsonstore::infrastructure::environment`) and
//! passes it in, so resolution is a pure function and tests can substitute
//! any platform.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Appended to the application directory name outside production.
pub const DEVELOPMENT_SUFFIX: &str = " (development)";

/// Error type for path resolution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    /// No base directory is known for this platform in this environment.
    #[error("could not determine application data directory on {0:?}")]
    NoAppDataDir(Platform),

    /// The application name cannot be used as a directory name.
    #[error("invalid application name {0:?}")]
    InvalidAppName(String),

    /// The store file name is empty, absolute, or escapes the data directory.
    #[error("invalid store file name {0:?}: must be a relative path inside the data directory")]
    InvalidFileName(String),
}

/// Operating system family, as far as data directory layout is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    /// Any platform without a known data directory convention.
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }
}

/// The platform facts path resolution depends on, captured once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub platform: Platform,
    /// `false` adds the ` (development)` suffix to the directory name.
    pub is_production: bool,
    /// The user's home directory (`HOME`, or `USERPROFILE` on Windows).
    pub home_dir: Option<PathBuf>,
    /// `%APPDATA%` on Windows.
    pub app_data: Option<PathBuf>,
    /// `$XDG_CONFIG_HOME` on Linux.
    pub xdg_config_home: Option<PathBuf>,
}

impl Environment {
    /// A production environment for `platform` with no base directories set.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            is_production: true,
            home_dir: None,
            app_data: None,
            xdg_config_home: None,
        }
    }

    pub fn production(mut self, is_production: bool) -> Self {
        self.is_production = is_production;
        self
    }

    pub fn with_home_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(dir.into());
        self
    }

    pub fn with_app_data(mut self, dir: impl Into<PathBuf>) -> Self {
        self.app_data = Some(dir.into());
        self
    }

    pub fn with_xdg_config_home(mut self, dir: impl Into<PathBuf>) -> Self {
        self.xdg_config_home = Some(dir.into());
        self
    }
}

/// The directory name used for `app_name`.
pub fn app_dir_name(app_name: &str, is_production: bool) -> String {
    if is_production {
        app_name.to_string()
    } else {
        format!("{app_name}{DEVELOPMENT_SUFFIX}")
    }
}

/// Resolves the data directory for `app_name` in `env`.
///
/// # Errors
///
/// Returns [`PathError::InvalidAppName`] for names that are empty or contain
/// path separators, and [`PathError::NoAppDataDir`] when `env` provides no
/// base directory for its platform.
///
/// # Examples
///
/// ```rust
/// use std::path::PathBuf;
/// use jsonstore_core::{resolve_app_data_dir, Environment, Platform};
///
/// let env = Environment::new(Platform::Linux).with_home_dir("/home/ada");
/// assert_eq!(
///     resolve_app_data_dir("notes", &env).unwrap(),
///     PathBuf::from("/home/ada/.config/notes"),
/// );
///
/// let dev = env.production(false);
/// assert_eq!(
///     resolve_app_data_dir("notes", &dev).unwrap(),
///     PathBuf::from("/home/ada/.config/notes (development)"),
/// );
/// ```
pub fn resolve_app_data_dir(app_name: &str, env: &Environment) -> Result<PathBuf, PathError> {
    validate_app_name(app_name)?;
    let base = platform_base_dir(env).ok_or(PathError::NoAppDataDir(env.platform))?;
    Ok(base.join(app_dir_name(app_name, env.is_production)))
}

/// Joins `file_name` onto `data_dir`, rejecting names that would escape it.
///
/// # Errors
///
/// Returns [`PathError::InvalidFileName`] if `file_name` is empty, absolute,
/// or contains a `..` component.
pub fn resolve_store_path(data_dir: &Path, file_name: &str) -> Result<PathBuf, PathError> {
    let invalid = || PathError::InvalidFileName(file_name.to_string());
    let mut has_name = false;
    for component in Path::new(file_name).components() {
        match component {
            Component::Normal(_) => has_name = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(invalid())
            }
        }
    }
    if !has_name {
        return Err(invalid());
    }
    Ok(data_dir.join(file_name))
}

fn validate_app_name(app_name: &str) -> Result<(), PathError> {
    let trimmed = app_name.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || app_name.contains(['/', '\\'])
    {
        return Err(PathError::InvalidAppName(app_name.to_string()));
    }
    Ok(())
}

/// The platform base directory, without the application subdirectory.
fn platform_base_dir(env: &Environment) -> Option<PathBuf> {
    match env.platform {
        Platform::Windows => env.app_data.clone().or_else(|| {
            env.home_dir
                .as_ref()
                .map(|h| h.join("AppData").join("Roaming"))
        }),
        Platform::MacOs => env
            .home_dir
            .as_ref()
            .map(|h| h.join("Library").join("Application Support")),
        Platform::Linux => env
            .xdg_config_home
            .clone()
            .filter(|p| p.is_absolute())
            .or_else(|| env.home_dir.as_ref().map(|h| h.join(".config"))),
        Platform::Other => None,
    }
}
