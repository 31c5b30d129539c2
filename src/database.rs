use crate::error::Error;
use crate::game::GameRecord;
use crate::read_dir::{read_dir, ScoreFile};
use crate::season::Season;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use flate2::read::GzDecoder;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Placeholder table left over from the original database import.
const PLACEHOLDER_SEASON: &str = "1900-1901";

/// Parses one `.scores` line: `YYYY-MM-DD AWAY AWAY_GOALS HOME HOME_GOALS RESULT`.
pub fn parse_line(line: &str, number: usize) -> Result<GameRecord, Error> {
    let error = |message: String| Error::Parse {
        line: number,
        message,
    };
    let fields: Vec<&str> = line.split_whitespace().collect();
    match *fields.as_slice() {
        [date, away, away_goals, home, home_goals, result] => Ok(GameRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|e| error(format!("bad date {:?}: {}", date, e)))?,
            away: away.to_owned(),
            home: home.to_owned(),
            away_goals: away_goals
                .parse()
                .map_err(|e| error(format!("bad away goals {:?}: {}", away_goals, e)))?,
            home_goals: home_goals
                .parse()
                .map_err(|e| error(format!("bad home goals {:?}: {}", home_goals, e)))?,
            result: result.parse().map_err(|e: Error| error(e.to_string()))?,
        }),
        _ => Err(error(format!("expected 6 fields, found {}", fields.len()))),
    }
}

/// Builds a season from `.scores` lines. Every team gets the lines it played
/// in, in file order.
pub fn read_season<R: BufRead>(season_id: &str, reader: R) -> Result<Season, Error> {
    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        records.push(parse_line(line, i + 1)?);
    }

    let mut teams = BTreeSet::new();
    for record in &records {
        teams.insert(record.home.as_str());
        teams.insert(record.away.as_str());
    }

    let mut season = Season::new(season_id);
    for team in teams {
        let schedule = records
            .iter()
            .filter(|record| record.home == team || record.away == team)
            .cloned();
        season.insert_team(team, schedule)?;
    }
    Ok(season)
}

pub fn load_season(file: &ScoreFile) -> Result<Season> {
    let handle = File::open(&file.path)?;
    let reader: Box<dyn Read> = if file.compressed {
        Box::new(GzDecoder::new(handle))
    } else {
        Box::new(handle)
    };
    Ok(read_season(&file.season_id, BufReader::new(reader))?)
}

/// Loads every season under `dir`, ordered by season id.
pub fn load<P: AsRef<Path>>(dir: P) -> Result<Vec<Season>> {
    let dir = dir.as_ref();
    let files = read_dir(dir).with_context(|| format!("unable to read {}", dir.display()))?;

    let mut seasons = Vec::new();
    for file in &files {
        if file.season_id == PLACEHOLDER_SEASON {
            debug!(path = %file.path.display(), "skipping placeholder season");
            continue;
        }
        let season =
            load_season(file).with_context(|| format!("unable to load {}", file.path.display()))?;
        info!(
            season = season.season_id(),
            teams = season.teams().count(),
            games = season.num_games(),
            "loaded season"
        );
        seasons.push(season);
    }
    Ok(seasons)
}
