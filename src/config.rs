use crate::game::Feature;
use crate::team_season::{Location, ResultCategory};
use crate::util::Scheme;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Settings for a batch run. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub scores_dir: PathBuf,
    pub window: usize,
    pub location: Location,
    pub result: ResultCategory,
    pub scheme: Scheme,
    pub features: Vec<Feature>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            scores_dir: PathBuf::from("scores"),
            window: 5,
            location: Location::All,
            result: ResultCategory::All,
            scheme: Scheme::Constant,
            features: Feature::ALL.to_vec(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("unable to open {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("unable to parse {}", path.display()))
    }
}
