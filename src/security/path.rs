use std::path::{Component, Path};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Invalid artifact path: {0}")]
    InvalidPath(String),
}

pub struct PathSanitizer;

impl PathSanitizer {
    /// Check a file name read from an artifact index before joining it onto
    /// the artifact directory. Rejects:
    /// - Directory traversal (../)
    /// - Absolute paths (/etc/passwd)
    /// - Anything with more than one path component
    /// - Hidden files (starting with .)
    pub fn file_name(raw: &str) -> Result<&str, PathError> {
        if raw.is_empty() {
            return Err(PathError::InvalidPath("Empty file name".to_string()));
        }

        let mut components = Path::new(raw).components();
        let name = match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => part.to_str().ok_or_else(|| {
                PathError::InvalidPath(format!("Invalid UTF-8 in file name: {:?}", part))
            })?,
            (Some(Component::Prefix(_) | Component::RootDir), _) => {
                return Err(PathError::InvalidPath(format!(
                    "Absolute path not allowed: {}",
                    raw
                )));
            }
            (Some(Component::ParentDir), _) => {
                return Err(PathError::InvalidPath(format!(
                    "Parent directory traversal not allowed: {}",
                    raw
                )));
            }
            _ => {
                return Err(PathError::InvalidPath(format!(
                    "Expected a bare file name: {}",
                    raw
                )));
            }
        };

        if name.starts_with('.') {
            return Err(PathError::InvalidPath(format!(
                "Hidden files not allowed: {}",
                raw
            )));
        }

        Ok(name)
    }
}
