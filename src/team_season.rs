use crate::error::{Error, Result};
use crate::game::{Game, GameId, ResultKind, Side};
use chrono::NaiveDate;
use serde::Deserialize;
use std::convert::TryFrom;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Location {
    All,
    Home,
    Away,
}

impl Location {
    fn admits(self, side: Side) -> bool {
        match self {
            Location::All => true,
            Location::Home => side == Side::Home,
            Location::Away => side == Side::Away,
        }
    }
}

impl FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Location> {
        match s {
            "all" => Ok(Location::All),
            "home" => Ok(Location::Home),
            "away" => Ok(Location::Away),
            _ => Err(Error::invalid("location", s)),
        }
    }
}

impl TryFrom<String> for Location {
    type Error = Error;

    fn try_from(s: String) -> Result<Location> {
        s.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ResultCategory {
    All,
    Wins,
    Losses,
    Regulation,
    /// Overtime and shootout games.
    NonRegulation,
    Overtime,
    Shootout,
}

impl ResultCategory {
    fn admits(self, game: &Game, side: Side) -> Result<bool> {
        Ok(match self {
            ResultCategory::All => true,
            ResultCategory::Wins => game.winning_side()? == Some(side),
            ResultCategory::Losses => game.winning_side()? == Some(side.opposite()),
            ResultCategory::Regulation => game.result() == ResultKind::Regulation,
            ResultCategory::NonRegulation => game.result() != ResultKind::Regulation,
            ResultCategory::Overtime => game.result() == ResultKind::Overtime,
            ResultCategory::Shootout => game.result() == ResultKind::Shootout,
        })
    }
}

impl FromStr for ResultCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<ResultCategory> {
        match s {
            "all" => Ok(ResultCategory::All),
            "wins" => Ok(ResultCategory::Wins),
            "losses" => Ok(ResultCategory::Losses),
            "Regulation" | "R" => Ok(ResultCategory::Regulation),
            "non-Regulation" | "notR" => Ok(ResultCategory::NonRegulation),
            "Overtime" | "OT" => Ok(ResultCategory::Overtime),
            "Shootout" | "SO" => Ok(ResultCategory::Shootout),
            _ => Err(Error::invalid("result category", s)),
        }
    }
}

impl TryFrom<String> for ResultCategory {
    type Error = Error;

    fn try_from(s: String) -> Result<ResultCategory> {
        s.parse()
    }
}

/// One team's schedule for a season, as indices into the season's game arena.
/// Games must be appended in date order.
#[derive(Debug, Clone)]
pub struct TeamSeason {
    season_id: String,
    team: String,
    games: Vec<GameId>,
}

impl TeamSeason {
    pub(crate) fn new(season_id: &str, team: &str) -> TeamSeason {
        TeamSeason {
            season_id: season_id.to_owned(),
            team: team.to_owned(),
            games: Vec::new(),
        }
    }

    pub fn season_id(&self) -> &str {
        &self.season_id
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub(crate) fn last(&self) -> Option<GameId> {
        self.games.last().copied()
    }

    pub(crate) fn contains(&self, id: GameId) -> bool {
        self.games.contains(&id)
    }

    pub(crate) fn push(&mut self, id: GameId) {
        self.games.push(id);
    }
}

/// Read access to a [`TeamSeason`] with its games resolved.
#[derive(Debug, Clone, Copy)]
pub struct TeamView<'a> {
    season: &'a TeamSeason,
    arena: &'a [Game],
}

impl<'a> TeamView<'a> {
    pub(crate) fn new(season: &'a TeamSeason, arena: &'a [Game]) -> TeamView<'a> {
        TeamView { season, arena }
    }

    pub fn team(&self) -> &'a str {
        &self.season.team
    }

    pub fn season_id(&self) -> &'a str {
        &self.season.season_id
    }

    pub fn len(&self) -> usize {
        self.season.len()
    }

    pub fn is_empty(&self) -> bool {
        self.season.is_empty()
    }

    /// The full schedule in stored order.
    pub fn games(&self) -> impl Iterator<Item = &'a Game> + 'a {
        let (season, arena) = (self.season, self.arena);
        season.games.iter().map(move |id| &arena[id.0])
    }

    /// Games matching `location` and `result`, strictly between `after` and
    /// `before` when given.
    pub fn get_games(
        &self,
        location: Location,
        result: ResultCategory,
        before: Option<NaiveDate>,
        after: Option<NaiveDate>,
    ) -> Result<Vec<&'a Game>> {
        Ok(self
            .select(location, result, before, after)?
            .into_iter()
            .map(|id| &self.arena[id.0])
            .collect())
    }

    pub fn num_games(
        &self,
        location: Location,
        result: ResultCategory,
        before: Option<NaiveDate>,
        after: Option<NaiveDate>,
    ) -> Result<usize> {
        Ok(self.select(location, result, before, after)?.len())
    }

    /// Goals for and against in the `window` most recent matching games before
    /// `before`, oldest first, shootout goal excluded. Both lists are empty when
    /// fewer than `window` games qualify.
    pub fn get_goals_lists(
        &self,
        window: usize,
        location: Location,
        result: ResultCategory,
        before: Option<NaiveDate>,
    ) -> Result<(Vec<u32>, Vec<u32>)> {
        if window == 0 {
            return Err(Error::invalid("window", "0"));
        }
        let games = self.get_games(location, result, before, None)?;
        if games.len() < window {
            return Ok((Vec::new(), Vec::new()));
        }
        let recent = &games[games.len() - window..];
        let team = self.team();
        let goals_for = recent
            .iter()
            .map(|game| game.goals_for(team, false))
            .collect::<Result<Vec<_>>>()?;
        let goals_against = recent
            .iter()
            .map(|game| game.goals_against(team, false))
            .collect::<Result<Vec<_>>>()?;
        Ok((goals_for, goals_against))
    }

    pub fn game_on_date(&self, date: NaiveDate) -> Result<&'a Game> {
        Ok(&self.arena[self.id_on_date(date)?.0])
    }

    pub(crate) fn id_on_date(&self, date: NaiveDate) -> Result<GameId> {
        self.season
            .games
            .iter()
            .copied()
            .find(|id| self.arena[id.0].date() == date)
            .ok_or_else(|| Error::NoGameOnDate {
                team: self.season.team.clone(),
                date,
            })
    }

    pub(crate) fn select(
        &self,
        location: Location,
        result: ResultCategory,
        before: Option<NaiveDate>,
        after: Option<NaiveDate>,
    ) -> Result<Vec<GameId>> {
        let mut selected = Vec::new();
        for &id in &self.season.games {
            let game = &self.arena[id.0];
            let side = game.side_of(&self.season.team)?;
            if !location.admits(side) {
                continue;
            }
            if before.map_or(false, |before| game.date() >= before)
                || after.map_or(false, |after| game.date() <= after)
            {
                continue;
            }
            if result.admits(game, side)? {
                selected.push(id);
            }
        }
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::{Location, ResultCategory};
    use crate::error::Error;
    use crate::game::record;
    use crate::season::Season;

    fn date(s: &str) -> Option<chrono::NaiveDate> {
        Some(s.parse().unwrap())
    }

    fn det_season() -> Season {
        let mut season = Season::new("2010-2011");
        season
            .insert_team(
                "DET",
                vec![
                    record("2010-10-08", "ANA", "DET", 2, 4, "R"),
                    record("2010-10-10", "DET", "CHI", 3, 2, "OT"),
                    record("2010-10-13", "DET", "STL", 1, 3, "R"),
                    record("2010-10-15", "CHI", "DET", 2, 3, "SO"),
                    record("2010-10-19", "DET", "ANA", 0, 5, "R"),
                    record("2010-10-22", "STL", "DET", 4, 3, "SO"),
                ],
            )
            .unwrap();
        season
    }

    #[test]
    fn test_location_split() {
        let season = det_season();
        let det = season.team("DET").unwrap();
        let home = det.num_games(Location::Home, ResultCategory::All, None, None).unwrap();
        let away = det.num_games(Location::Away, ResultCategory::All, None, None).unwrap();
        assert_eq!(home, 3);
        assert_eq!(away, 3);
        assert_eq!(home + away, det.len());
    }

    #[test]
    fn test_result_categories() {
        let season = det_season();
        let det = season.team("DET").unwrap();
        let count = |result| det.num_games(Location::All, result, None, None).unwrap();
        assert_eq!(count(ResultCategory::All), 6);
        assert_eq!(count(ResultCategory::Wins), 3);
        assert_eq!(count(ResultCategory::Losses), 3);
        assert_eq!(count(ResultCategory::Regulation), 3);
        assert_eq!(count(ResultCategory::NonRegulation), 3);
        assert_eq!(count(ResultCategory::Overtime), 1);
        assert_eq!(count(ResultCategory::Shootout), 2);

        let home_wins = det
            .get_games(Location::Home, ResultCategory::Wins, None, None)
            .unwrap();
        let dates: Vec<_> = home_wins.iter().map(|g| g.date().to_string()).collect();
        assert_eq!(dates, vec!["2010-10-08", "2010-10-15"]);
    }

    #[test]
    fn test_date_window_is_strict() {
        let season = det_season();
        let det = season.team("DET").unwrap();
        let count = |before, after| {
            det.num_games(Location::All, ResultCategory::All, before, after)
                .unwrap()
        };
        assert_eq!(count(date("2010-10-13"), None), 2);
        assert_eq!(count(None, date("2010-10-13")), 3);
        assert_eq!(count(date("2010-10-19"), date("2010-10-08")), 3);
        assert_eq!(count(date("2010-10-08"), None), 0);
        assert_eq!(count(None, None), 6);
        assert_eq!(
            det.num_games(Location::Away, ResultCategory::All, date("2010-10-20"), date("2010-10-10"))
                .unwrap(),
            2
        );
    }

    #[test]
    fn test_goals_lists() {
        let season = det_season();
        let det = season.team("DET").unwrap();

        let (gf, ga) = det
            .get_goals_lists(3, Location::All, ResultCategory::All, date("2010-10-19"))
            .unwrap();
        // the shootout on 10-15 counts as 2-2
        assert_eq!(gf, vec![3, 1, 2]);
        assert_eq!(ga, vec![2, 3, 2]);

        for window in 1..=3 {
            let (gf, ga) = det
                .get_goals_lists(window, Location::All, ResultCategory::All, date("2010-10-13"))
                .unwrap();
            if window <= 2 {
                assert_eq!(gf.len(), window);
                assert_eq!(ga.len(), window);
            } else {
                assert!(gf.is_empty() && ga.is_empty());
            }
        }

        let (gf, ga) = det
            .get_goals_lists(2, Location::Home, ResultCategory::All, None)
            .unwrap();
        assert_eq!(gf, vec![2, 3]);
        assert_eq!(ga, vec![2, 3]);

        assert!(det
            .get_goals_lists(0, Location::All, ResultCategory::All, None)
            .is_err());
    }

    #[test]
    fn test_game_on_date() {
        let season = det_season();
        let det = season.team("DET").unwrap();
        let game = det.game_on_date("2010-10-13".parse().unwrap()).unwrap();
        assert_eq!(game.home(), "STL");
        assert!(matches!(
            det.game_on_date("2010-10-14".parse().unwrap()),
            Err(Error::NoGameOnDate { .. })
        ));
    }

    #[test]
    fn test_parse_filters() {
        assert_eq!("home".parse::<Location>().unwrap(), Location::Home);
        assert!(matches!(
            "neutral".parse::<Location>(),
            Err(Error::InvalidArgument { kind: "location", .. })
        ));
        assert_eq!(
            "non-Regulation".parse::<ResultCategory>().unwrap(),
            ResultCategory::NonRegulation
        );
        assert_eq!("notR".parse::<ResultCategory>().unwrap(), ResultCategory::NonRegulation);
        assert!("ties".parse::<ResultCategory>().is_err());
    }
}
