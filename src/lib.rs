//! Rolling score projections and win/loss streaks for a hockey season, computed
//! from game results and exported as per-game features.

#![warn(clippy::pedantic, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

pub mod config;
pub mod database;
pub mod error;
pub mod features;
pub mod game;
pub mod read_dir;
pub mod season;
pub mod team_season;
pub mod util;

pub use crate::error::{Error, Result};
pub use crate::game::{
    Feature, Features, Game, GameId, GameRecord, Outcome, Projections, ResultClass, ResultKind,
    Side,
};
pub use crate::season::Season;
pub use crate::team_season::{Location, ResultCategory, TeamSeason, TeamView};
pub use crate::util::{weights, AwayHome, Scheme};
