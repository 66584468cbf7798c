//! One-shot downloader for the Japanese WordNet database.

use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

use crate::error::{Error, Result};
use crate::wordnet::WORDNET_DB_FILE;

/// Upstream release archive of the Japanese WordNet SQLite database.
pub const WORDNET_URL: &str =
    "https://github.com/bond-lab/wnja/releases/download/v1.1/wnjpn.db.gz";

/// Fetch and decompress the WordNet database into `dir`.
///
/// Refuses with [`Error::AlreadyDownloaded`] when the target file exists.
/// The decompressed database is written to a temp file in the same
/// directory and renamed into place, so a failed download never leaves a
/// half-written `wnjpn.db` behind.
pub async fn download(dir: &Path) -> Result<PathBuf> {
    let target = dir.join(WORDNET_DB_FILE);
    if target.exists() {
        return Err(Error::AlreadyDownloaded(target));
    }

    std::fs::create_dir_all(dir)?;

    tracing::info!("downloading {WORDNET_URL}");
    let response = reqwest::get(WORDNET_URL).await?.error_for_status()?;
    let compressed = response.bytes().await?;

    let mut decoder = GzDecoder::new(compressed.as_ref());
    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    std::io::copy(&mut decoder, staged.as_file_mut())?;
    staged.as_file_mut().flush()?;
    staged.persist(&target).map_err(|e| Error::Io(e.error))?;

    tracing::info!("wrote {}", target.display());
    Ok(target)
}
