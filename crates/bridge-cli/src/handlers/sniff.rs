//! Sniff command handler.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use bridge_core::{Slot, classify};

/// Print how an upload with these bytes would be classified and stored.
pub async fn execute(file: &Path, content_type: Option<&str>) -> Result<()> {
    let data = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    print!("{}", describe(&data, content_type));
    Ok(())
}

/// Human-readable classification report.
pub fn describe(data: &[u8], content_type: Option<&str>) -> String {
    let classification = classify(data, content_type);
    let mut out = String::new();
    let _ = writeln!(out, "bytes:     {}", data.len());
    let _ = writeln!(out, "container: {}", classification.container);
    let _ = writeln!(
        out,
        "kind:      {} ({})",
        classification.kind,
        classification.kind.content_type()
    );
    for slot in Slot::ALL {
        let kind = slot.admit(classification.kind);
        let _ = writeln!(out, "as {:<8} {}", slot.as_str(), slot.file_name(kind));
    }
    out
}
