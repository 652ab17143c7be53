use crate::error::Result;
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// Public home of the HIGGS dataset: 11M rows of `label, f1..f28`.
pub const HIGGS_URL: &str =
    "https://archive.ics.uci.edu/ml/machine-learning-databases/00280/HIGGS.csv.gz";

/// Downloads the dataset to `dest` unless it is already cached there.
/// A `.gz` URL is decompressed on the fly, so `dest` always ends up holding
/// plain CSV. The download lands in a `.part` file first and is renamed only
/// on success, so an interrupted fetch never poisons the cache.
pub fn ensure_dataset(url: &str, dest: &Path) -> Result<()> {
    if dest.exists() {
        tracing::debug!(path = %dest.display(), "dataset already cached, skipping download");
        return Ok(());
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    tracing::info!(%url, "downloading dataset");
    let response = reqwest::blocking::get(url)?.error_for_status()?;

    let part_path = dest.with_extension("part");
    {
        let mut writer = BufWriter::new(File::create(&part_path)?);
        if url.ends_with(".gz") {
            let mut decoder = GzDecoder::new(response);
            std::io::copy(&mut decoder, &mut writer)?;
        } else {
            let mut reader = response;
            std::io::copy(&mut reader, &mut writer)?;
        }
    }
    fs::rename(&part_path, dest)?;

    tracing::info!(path = %dest.display(), "dataset ready");
    Ok(())
}
