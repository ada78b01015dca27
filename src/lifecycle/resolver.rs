use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Contents of the override: one `nameserver` line per server.
pub fn render(nameservers: &[String]) -> String {
    nameservers
        .iter()
        .map(|ns| format!("nameserver {ns}\n"))
        .collect()
}

/// Replace `path` with a resolver config listing `nameservers`.
///
/// Written to a sibling temp file and renamed into place, so readers see
/// either the old file or the new one.
pub fn write_resolver_override(path: &Path, nameservers: &[String]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    tmp.write_all(render(nameservers).as_bytes())
        .context("failed to write resolver override")?;
    tmp.as_file()
        .sync_all()
        .context("failed to flush resolver override")?;
    tmp.persist(path)
        .with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}
