//! Resolution of the backing file location

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{Result, StoreError};

/// File name used when none is given, shared with existing desktop installs
pub const DEFAULT_FILE_NAME: &str = "sp_flutter.json";

/// Supplies the absolute path of the backing file
///
/// The store asks for the path every time it touches the disk and never
/// modifies the resolver.
pub trait PathResolver {
    fn resolve(&self) -> Result<PathBuf>;
}

impl<F> PathResolver for F
where
    F: Fn() -> Result<PathBuf>,
{
    fn resolve(&self) -> Result<PathBuf> {
        self()
    }
}

/// A backing file in the user's documents directory
///
/// - Linux: `$XDG_DOCUMENTS_DIR/<file>` or `~/Documents/<file>`
/// - macOS: `~/Documents/<file>`
/// - Windows: `{FOLDERID_Documents}\<file>`
#[derive(Clone, Debug)]
pub struct DocumentsDir {
    file_name: String,
}

impl DocumentsDir {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

impl Default for DocumentsDir {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_NAME)
    }
}

impl PathResolver for DocumentsDir {
    fn resolve(&self) -> Result<PathBuf> {
        directories::UserDirs::new()
            .and_then(|dirs| dirs.document_dir().map(|dir| dir.join(&self.file_name)))
            .ok_or(StoreError::NoStorageDir)
    }
}

/// Identifies an application for [`AppDataDir`]
///
/// ```
/// use prefs_store::AppName;
///
/// let app_name = AppName::new("com", "acme", "roadrunner");
/// assert_eq!(app_name.to_string(), "com.acme.roadrunner");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AppName {
    /// Reverse-domain prefix, e.g. `com`
    pub qualifier: String,
    pub organization: String,
    pub application: String,
}

impl AppName {
    pub fn new(
        qualifier: impl Into<String>,
        organization: impl Into<String>,
        application: impl Into<String>,
    ) -> Self {
        Self {
            qualifier: qualifier.into(),
            organization: organization.into(),
            application: application.into(),
        }
    }

    /// Platform directories for this application, if a home directory is known
    fn project_dirs(&self) -> Option<ProjectDirs> {
        ProjectDirs::from(&self.qualifier, &self.organization, &self.application)
    }
}

impl std::fmt::Display for AppName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            self.qualifier, self.organization, self.application
        )
    }
}

/// A backing file in the application's local config directory
///
/// - Linux: `$XDG_CONFIG_HOME/<app>/<file>` or `~/.config/<app>/<file>`
/// - macOS: `~/Library/Application Support/<app>/<file>`
/// - Windows: `%LOCALAPPDATA%\<org>\<app>\config\<file>`
///
/// Falls back to the working directory when no home directory is known.
#[derive(Clone, Debug)]
pub struct AppDataDir {
    app_name: AppName,
    file_name: String,
}

impl AppDataDir {
    pub fn new(app_name: AppName) -> Self {
        Self {
            app_name,
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }

    /// Use a different file name inside the config directory
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }
}

impl PathResolver for AppDataDir {
    fn resolve(&self) -> Result<PathBuf> {
        let dir = self
            .app_name
            .project_dirs()
            .map(|dirs| dirs.config_local_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(dir.join(&self.file_name))
    }
}

/// A backing file at an explicit path
#[derive(Clone, Debug)]
pub struct FixedPath(pub PathBuf);

impl FixedPath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }
}

impl PathResolver for FixedPath {
    fn resolve(&self) -> Result<PathBuf> {
        Ok(self.0.clone())
    }
}
