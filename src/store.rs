use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::BeerRecord;

/// Where the merged record set lives, relative to the working directory.
pub const DEFAULT_PATH: &str = "../output/rated_beer.json";

pub fn load_records(path: &Path) -> Result<Vec<BeerRecord>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let records = serde_json::from_str(&contents)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(records)
}

/// Whole-file overwrite. There is no partial-write or versioning scheme;
/// the file is the single source of truth between pipeline stages.
pub fn save_records(records: &[BeerRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(records)?;
    let mut file = File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
