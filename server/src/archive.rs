//! Download archive creation — in-memory zip of a project bundle

use std::io::{Cursor, Write};

use anyhow::{bail, Result};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use appforge_pipeline::{slugify, ProjectBundle};

/// Build a zip archive of every bundle file, in memory.
pub fn bundle_to_zip(bundle: &ProjectBundle) -> Result<Vec<u8>> {
    if bundle.is_empty() {
        // Assembled bundles are never empty; reaching this is a programming
        // error upstream, not a user condition.
        bail!("refusing to archive an empty bundle");
    }

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for (name, content) in bundle.iter() {
        // Zip-slip prevention: bundle paths are relative and descend only.
        if name.contains("..") || name.starts_with('/') || name.starts_with('\\') {
            bail!("invalid filename in bundle: {name}");
        }
        zip.start_file(name, options)?;
        zip.write_all(content.as_bytes())?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Download filename derived from the title with the manifest slug rule.
pub fn download_filename(title: &str) -> String {
    format!("{}.zip", slugify(title))
}
