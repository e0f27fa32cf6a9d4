use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Replace the whole content of `path`.
///
/// The data goes to a sibling temp file first and is renamed over the
/// target, so readers see either the old or the new content.
pub async fn write_replace(path: &Path, contents: &[u8]) -> io::Result<()> {
    let temp_path = temp_path_for(path);
    fs::write(&temp_path, contents).await?;
    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e);
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
