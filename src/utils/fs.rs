//! File-system helpers used by the render pipeline.
//!
//! Each operation exists in a blocking and a non-blocking form so the two
//! render paths stay behaviorally identical: the async facade methods await
//! the `tokio::fs` variants, the sync mirrors call the `std::fs` ones.

use std::path::Path;

use anyhow::{Context, Result};

/// Create a directory and all missing parents.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    } else if !path.is_dir() {
        anyhow::bail!("path exists but is not a directory: {}", path.display());
    }
    Ok(())
}

/// Non-blocking variant of [`ensure_dir`].
pub async fn ensure_dir_async(path: &Path) -> Result<()> {
    if !path.exists() {
        tokio::fs::create_dir_all(path)
            .await
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    } else if !path.is_dir() {
        anyhow::bail!("path exists but is not a directory: {}", path.display());
    }
    Ok(())
}

/// Read a file as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read file: {}", path.display()))
}

/// Non-blocking variant of [`read_text`].
pub async fn read_text_async(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write text to a file, creating the parent directory chain first.
/// An existing file is overwritten.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write file: {}", path.display()))
}

/// Non-blocking variant of [`write_text`].
pub async fn write_text_async(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_async(parent).await?;
    }
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("failed to write file: {}", path.display()))
}
