//! Cache management commands

use std::path::Path;

use crate::cache::ResponseCache;
use crate::cli::OutputFormat;
use crate::error::Result;

/// Show cache path
pub fn path() -> Result<()> {
    let path = ResponseCache::default_dir()?;
    println!("{}", path.display());
    Ok(())
}

/// Remove every cached response
pub fn clear(format: OutputFormat) -> Result<()> {
    let root = ResponseCache::default_dir()?;
    clear_at(&root, format)
}

fn clear_at(root: &Path, format: OutputFormat) -> Result<()> {
    let removed = ResponseCache::clear_dir(root)?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "path": root.display().to_string(),
                "removed": removed,
                "success": true,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Table => {
            if removed {
                println!("Cleared cache at {}", root.display());
            } else {
                println!("Cache was already empty");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clear_removes_directory() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("actrics");
        std::fs::create_dir_all(root.join("ab")).unwrap();
        std::fs::write(root.join("ab").join("entry"), b"{}").unwrap();

        clear_at(&root, OutputFormat::Table).unwrap();
        assert!(!root.exists());
    }

    #[test]
    fn test_clear_missing_directory_is_ok() {
        let dir = TempDir::new().unwrap();
        clear_at(&dir.path().join("missing"), OutputFormat::Json).unwrap();
    }
}
