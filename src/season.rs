use crate::error::{Error, Result};
use crate::game::{Feature, Game, GameId, GameRecord, Projections};
use crate::team_season::{Location, ResultCategory, TeamSeason, TeamView};
use crate::util::{dot, weights, AwayHome, Scheme};
use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use tracing::{debug, instrument, trace, warn};

type GameKey = (NaiveDate, String, String);

/// All teams' schedules for one season. Each logical game is stored once; a
/// team's schedule refers to it by [`GameId`], so both participants always see
/// the same features.
#[derive(Debug)]
pub struct Season {
    season_id: String,
    games: Vec<Game>,
    index: FxHashMap<GameKey, GameId>,
    teams: BTreeMap<String, TeamSeason>,
}

impl Season {
    pub fn new(season_id: impl Into<String>) -> Season {
        Season {
            season_id: season_id.into(),
            games: Vec::new(),
            index: FxHashMap::default(),
            teams: BTreeMap::new(),
        }
    }

    pub fn season_id(&self) -> &str {
        &self.season_id
    }

    /// Appends `record` to `team`'s schedule. The opponent's copy of the same
    /// game resolves to the same slot and must agree on every field.
    pub fn insert(&mut self, team: &str, record: GameRecord) -> Result<GameId> {
        if record.home != team && record.away != team {
            return Err(Error::NotAParticipant {
                team: team.to_owned(),
                game: Game::new(record).to_string(),
            });
        }

        let key = (record.date, record.home.clone(), record.away.clone());
        let id = match self.index.get(&key).copied() {
            Some(id) => {
                if !self.games[id.0].matches_record(&record) {
                    return Err(Error::ConflictingRecord(Game::new(record).to_string()));
                }
                id
            }
            None => {
                let id = GameId(self.games.len());
                self.games.push(Game::new(record));
                self.index.insert(key, id);
                id
            }
        };

        let game = &self.games[id.0];
        let season_id = &self.season_id;
        let schedule = self
            .teams
            .entry(team.to_owned())
            .or_insert_with(|| TeamSeason::new(season_id, team));
        if schedule.contains(id) {
            return Err(Error::ConflictingRecord(game.to_string()));
        }
        if let Some(last) = schedule.last() {
            if self.games[last.0].date() > game.date() {
                warn!(team, game = %game, "game appended out of date order");
            }
        }
        schedule.push(id);
        Ok(id)
    }

    pub fn insert_team<I>(&mut self, team: &str, records: I) -> Result<()>
    where
        I: IntoIterator<Item = GameRecord>,
    {
        for record in records {
            self.insert(team, record)?;
        }
        Ok(())
    }

    /// Team codes in sorted order.
    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.teams.keys().map(String::as_str)
    }

    pub fn team(&self, team: &str) -> Result<TeamView<'_>> {
        self.teams
            .get(team)
            .map(|schedule| TeamView::new(schedule, &self.games))
            .ok_or_else(|| Error::UnknownTeam(team.to_owned()))
    }

    pub fn game(&self, id: GameId) -> &Game {
        &self.games[id.0]
    }

    /// Number of distinct games.
    pub fn num_games(&self) -> usize {
        self.games.len()
    }

    fn views(&self) -> impl Iterator<Item = TeamView<'_>> {
        let games = &self.games;
        self.teams
            .values()
            .map(move |schedule| TeamView::new(schedule, games))
    }

    /// Writes rolling weighted goal projections onto every game where both
    /// teams have at least `window` qualifying earlier games.
    #[instrument(skip(self), fields(season = %self.season_id))]
    pub fn get_projections(
        &mut self,
        window: usize,
        location: Location,
        result: ResultCategory,
        scheme: Scheme,
    ) -> Result<()> {
        let weights = weights(window, scheme)?;
        let mut updates = Vec::new();

        for view in self.views() {
            // walk every game so both home and away appearances get visited
            for id in view.select(Location::All, result, None, None)? {
                let game = &self.games[id.0];
                let side = game.side_of(view.team())?;
                let opponent = self.team(game.team(side.opposite()))?;
                let before = Some(game.date());

                let mut lists = AwayHome::default();
                *lists.get_mut(side) = view.get_goals_lists(window, location, result, before)?;
                *lists.get_mut(side.opposite()) =
                    opponent.get_goals_lists(window, location, result, before)?;

                let sums = lists.map_opt(|(goals_for, goals_against): &(Vec<u32>, Vec<u32>)| {
                    if goals_for.is_empty() || goals_against.is_empty() {
                        None
                    } else {
                        Some((dot(&weights, goals_for), dot(&weights, goals_against)))
                    }
                });
                match sums {
                    Some(sums) => updates.push((id, project(sums))),
                    None => trace!(game = %game, "not enough history for projection"),
                }
            }
        }

        debug!(games = updates.len(), "inserting projections");
        for (id, projections) in updates {
            self.games[id.0].insert_projections(projections);
        }
        Ok(())
    }

    /// Writes each team's win/loss streak coming into each of its selected games.
    #[instrument(skip(self), fields(season = %self.season_id))]
    pub fn get_streaks(&mut self, location: Location, result: ResultCategory) -> Result<()> {
        let mut updates = Vec::new();

        for view in self.views() {
            let team = view.team();
            let ids = view.select(location, result, None, None)?;
            let won = ids
                .iter()
                .map(|id| self.games[id.0].won_by(team))
                .collect::<Result<Vec<_>>>()?;

            for (i, &id) in ids.iter().enumerate() {
                let game = &self.games[id.0];
                let side = game.side_of(team)?;

                // the opponent's schedule must hold the same game
                let opponent = self.team(game.team(side.opposite()))?;
                if opponent.id_on_date(game.date())? != id {
                    return Err(Error::ConflictingRecord(game.to_string()));
                }

                updates.push((id, side, streak_before(&won[..i])));
            }
        }

        debug!(entries = updates.len(), "inserting streaks");
        for (id, side, streak) in updates {
            self.games[id.0].insert_streak(streak, side);
        }
        Ok(())
    }

    /// Every game once, by date, keeping only games that carry all of
    /// `required`.
    pub fn all_games(&self, required: &[Feature]) -> Result<Vec<&Game>> {
        let mut games = Vec::new();
        for view in self.views() {
            for game in view.get_games(Location::Home, ResultCategory::All, None, None)? {
                if required.iter().all(|&feature| game.features().contains(feature)) {
                    games.push(game);
                }
            }
        }
        games.sort_by_key(|game| game.date());
        Ok(games)
    }
}

fn project(sums: AwayHome<(f64, f64)>) -> Projections {
    let (home_gf, home_ga) = sums.home;
    let (away_gf, away_ga) = sums.away;
    Projections {
        home_gf,
        home_ga,
        away_gf,
        away_ga,
        diff_score: (home_gf + away_ga) / 2.0 - (away_gf + home_ga) / 2.0,
    }
}

/// Signed length of the run of identical results at the end of `prior`:
/// positive for wins, negative for losses. An unresolved game ends the run.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn streak_before(prior: &[Option<bool>]) -> i32 {
    let mut results = prior.iter().rev();
    match results.next() {
        Some(&Some(won)) => {
            let run = 1 + results.take_while(|&&r| r == Some(won)).count() as i32;
            if won {
                run
            } else {
                -run
            }
        }
        _ => 0,
    }
}
