//! XDG-compliant path resolution for scopewise.
//!
//! The config file lives under the config directory. A relative
//! knowledge base path (the default `data/estimation_knowledge.json`) is
//! resolved against the data directory; absolute paths are used as given.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

/// Errors from path resolution.
#[derive(Debug, Error, Diagnostic)]
pub enum PathError {
    #[error("cannot determine home directory")]
    #[diagnostic(
        code(scopewise::paths::no_home),
        help("Set the HOME environment variable or pass --config explicitly.")
    )]
    NoHome,

    #[error("failed to create directory: {path}")]
    #[diagnostic(
        code(scopewise::paths::create_dir),
        help("Check that the parent directory exists and you have write permissions.")
    )]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type PathResult<T> = std::result::Result<T, PathError>;

/// Global XDG-compliant directories for scopewise.
#[derive(Debug, Clone)]
pub struct ScopewisePaths {
    /// `$XDG_CONFIG_HOME/scopewise/`
    pub config_dir: PathBuf,
    /// `$XDG_DATA_HOME/scopewise/`
    pub data_dir: PathBuf,
}

impl ScopewisePaths {
    /// Resolve XDG directories from environment variables with standard fallbacks.
    pub fn resolve() -> PathResult<Self> {
        let home = std::env::var("HOME")
            .map(PathBuf::from)
            .map_err(|_| PathError::NoHome)?;

        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".config"))
            .join("scopewise");

        let data_dir = std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".local/share"))
            .join("scopewise");

        Ok(Self {
            config_dir,
            data_dir,
        })
    }

    /// Rooted at an explicit directory (tests, portable installs).
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_dir: root.join("config"),
            data_dir: root.join("data"),
        }
    }

    /// Path to the estimator config file.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// `path` under the data directory when relative, unchanged when absolute.
    pub fn data_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }

    /// Create all base directories. Idempotent.
    pub fn ensure_dirs(&self) -> PathResult<()> {
        for dir in [&self.config_dir, &self.data_dir] {
            std::fs::create_dir_all(dir).map_err(|e| PathError::CreateDir {
                path: dir.display().to_string(),
                source: e,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rooted_layout() {
        let paths = ScopewisePaths::rooted("/tmp/sw");
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/sw/config/config.toml"));
        assert_eq!(paths.data_dir, PathBuf::from("/tmp/sw/data"));
    }

    #[test]
    fn relative_data_paths_land_in_data_dir() {
        let paths = ScopewisePaths::rooted("/tmp/sw");
        assert_eq!(
            paths.data_path(Path::new("data/estimation_knowledge.json")),
            PathBuf::from("/tmp/sw/data/data/estimation_knowledge.json")
        );
        assert_eq!(
            paths.data_path(Path::new("/srv/kb.json")),
            PathBuf::from("/srv/kb.json")
        );
    }

    #[test]
    fn ensure_dirs_is_idempotent() {
        let dir = tempfile::TempDir::new().unwrap();
        let paths = ScopewisePaths::rooted(dir.path());
        paths.ensure_dirs().unwrap();
        paths.ensure_dirs().unwrap();
        assert!(paths.config_dir.is_dir());
        assert!(paths.data_dir.is_dir());
    }
}
