use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Write a value as pretty-printed JSON (2-space indent, UTF-8 kept as-is)
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .context(format!("Failed to serialize {}", path.display()))?;
    fs::write(path, json).context(format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Read and deserialize a JSON artifact
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        fs::read_to_string(path).context(format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).context(format!("Failed to parse {}", path.display()))
}

/// Write a plain-text artifact
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).context(format!("Failed to write {}", path.display()))
}

/// Create an output directory (and parents) if it does not exist
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .context(format!("Failed to create directory: {}", path.display()))
}

/// Compute SHA256 hash of file contents
pub fn sha256_file(path: &Path) -> Result<String> {
    let contents = fs::read(path).context(format!("Failed to read file: {}", path.display()))?;
    let mut hasher = Sha256::new();
    hasher.update(&contents);
    Ok(hex::encode(hasher.finalize()))
}

/// Current time as RFC 3339, stamped into artifact metadata
pub fn timestamp() -> String {
    Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_json_round_trip_preserves_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.json");
        let sample = Sample {
            name: "Café naïve 文档".to_string(),
            count: 3,
        };

        write_json(&path, &sample).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Café naïve 文档"));
        assert!(raw.contains("\n  \"count\": 3"));

        let loaded: Sample = read_json(&path).unwrap();
        assert_eq!(loaded, sample);
    }

    #[test]
    fn test_read_json_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();

        let err = read_json::<Sample>(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_sha256_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.txt");
        fs::write(&path, "hello").unwrap();

        assert_eq!(
            sha256_file(&path).unwrap(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_ensure_dir_nested() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(&nested).unwrap();
    }

    #[test]
    fn test_timestamp_is_rfc3339() {
        let ts = timestamp();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
