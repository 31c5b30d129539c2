use crate::error::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const EXTENSION: &str = ".scores";
const GZ_EXTENSION: &str = ".scores.gz";

pub type ScoreFiles = BTreeSet<ScoreFile>;

/// A season's score file. Ordered by season id.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScoreFile {
    pub season_id: String,
    pub path: PathBuf,
    pub compressed: bool,
}

impl ScoreFile {
    fn from_path(path: &Path) -> Option<ScoreFile> {
        let name = path.file_name()?.to_str()?;
        let (season_id, compressed) = if let Some(stem) = name.strip_suffix(GZ_EXTENSION) {
            (stem, true)
        } else {
            (name.strip_suffix(EXTENSION)?, false)
        };
        if season_id.is_empty() {
            return None;
        }
        Some(ScoreFile {
            season_id: season_id.to_owned(),
            path: path.to_owned(),
            compressed,
        })
    }
}

pub fn read_dir(path: &Path) -> Result<ScoreFiles> {
    let mut set = BTreeSet::new();
    for entry in WalkDir::new(path).follow_links(true) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(file) = ScoreFile::from_path(entry.path()) {
            set.insert(file);
        }
    }
    Ok(set)
}
