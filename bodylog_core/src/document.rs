//! Loading the measurement log from disk.
//!
//! The log is a YAML file with a top-level `DOB` and a list of `samples`.
//! It is read under a shared lock so a concurrent writer holding an
//! exclusive lock is never read mid-save.

use crate::{LogDocument, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Read and deserialize a log document
///
/// Missing `DOB` or `samples` fields are reported as a YAML error.
pub fn load(path: &Path) -> Result<LogDocument> {
    let file = File::open(path)?;
    FileExt::lock_shared(&file)?;

    let mut contents = String::new();
    let read = BufReader::new(&file).read_to_string(&mut contents);
    FileExt::unlock(&file)?;
    read?;

    let doc = parse(&contents)?;
    tracing::debug!(
        "Read {} samples from {:?}",
        doc.samples.len(),
        path
    );
    Ok(doc)
}

/// Deserialize a log document from YAML text
pub fn parse(contents: &str) -> Result<LogDocument> {
    Ok(serde_yaml::from_str(contents)?)
}
