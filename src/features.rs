//! Per-game feature export for the outcome model.

use crate::error::{Error, Result};
use crate::game::{Feature, Game};
use chrono::NaiveDate;
use serde::Serialize;

/// One game's features and label, as written by the binary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow<'a> {
    pub date: NaiveDate,
    pub away: &'a str,
    pub home: &'a str,
    #[serde(rename = "proj_home_GF")]
    pub proj_home_gf: Option<f64>,
    #[serde(rename = "proj_home_GA")]
    pub proj_home_ga: Option<f64>,
    #[serde(rename = "proj_away_GF")]
    pub proj_away_gf: Option<f64>,
    #[serde(rename = "proj_away_GA")]
    pub proj_away_ga: Option<f64>,
    pub proj_diff_score: Option<f64>,
    pub home_streak: Option<i32>,
    pub away_streak: Option<i32>,
    pub diff_streak: Option<i32>,
    pub label: u8,
}

impl<'a> FeatureRow<'a> {
    pub fn from_game(game: &'a Game) -> Result<FeatureRow<'a>> {
        let features = game.features();
        Ok(FeatureRow {
            date: game.date(),
            away: game.away(),
            home: game.home(),
            proj_home_gf: features.get(Feature::ProjHomeGf),
            proj_home_ga: features.get(Feature::ProjHomeGa),
            proj_away_gf: features.get(Feature::ProjAwayGf),
            proj_away_ga: features.get(Feature::ProjAwayGa),
            proj_diff_score: features.get(Feature::ProjDiffScore),
            home_streak: features.home_streak,
            away_streak: features.away_streak,
            diff_streak: features.diff_streak(),
            label: game.numerical_result()? as u8,
        })
    }
}

/// One column per requested feature, one entry per game.
pub fn feature_matrix(games: &[&Game], names: &[Feature]) -> Result<Vec<Vec<f64>>> {
    names
        .iter()
        .map(|&feature| {
            games
                .iter()
                .map(|game| {
                    game.features()
                        .get(feature)
                        .ok_or_else(|| Error::MissingFeature {
                            feature: feature.to_string(),
                            game: game.to_string(),
                        })
                })
                .collect::<Result<Vec<f64>>>()
        })
        .collect()
}

pub fn labels(games: &[&Game]) -> Result<Vec<u8>> {
    games
        .iter()
        .map(|game| game.numerical_result().map(|class| class as u8))
        .collect()
}
