use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ResultKind {
    #[serde(rename = "R")]
    Regulation,
    #[serde(rename = "OT")]
    Overtime,
    #[serde(rename = "SO")]
    Shootout,
}

impl ResultKind {
    pub fn code(self) -> &'static str {
        match self {
            ResultKind::Regulation => "R",
            ResultKind::Overtime => "OT",
            ResultKind::Shootout => "SO",
        }
    }
}

impl FromStr for ResultKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<ResultKind> {
        match s {
            "R" => Ok(ResultKind::Regulation),
            "OT" => Ok(ResultKind::Overtime),
            "SO" => Ok(ResultKind::Shootout),
            _ => Err(Error::invalid("result kind", s)),
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Side> {
        match s {
            "home" => Ok(Side::Home),
            "away" => Ok(Side::Away),
            _ => Err(Error::invalid("side", s)),
        }
    }
}

/// Outcome of a game with the shootout case kept apart from decided games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    HomeWin,
    AwayWin,
    ShootoutDecided,
}

/// Classification label handed to the downstream model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ResultClass {
    Decided = 0,
    Shootout = 1,
}

/// One raw row from the persistence layer, in its column order:
/// `(date, away, home, away_goals, home_goals, result)`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameRecord {
    pub date: NaiveDate,
    pub away: String,
    pub home: String,
    pub away_goals: u32,
    pub home_goals: u32,
    pub result: ResultKind,
}

/// Index of a game in its season's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projections {
    pub home_gf: f64,
    pub home_ga: f64,
    pub away_gf: f64,
    pub away_ga: f64,
    pub diff_score: f64,
}

/// Derived per-game features, filled in by the season passes.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Features {
    pub projections: Option<Projections>,
    pub home_streak: Option<i32>,
    pub away_streak: Option<i32>,
}

impl Features {
    pub fn diff_streak(&self) -> Option<i32> {
        Some(self.home_streak? - self.away_streak?)
    }

    pub fn get(&self, feature: Feature) -> Option<f64> {
        let projections = self.projections.as_ref();
        match feature {
            Feature::ProjHomeGf => projections.map(|p| p.home_gf),
            Feature::ProjHomeGa => projections.map(|p| p.home_ga),
            Feature::ProjAwayGf => projections.map(|p| p.away_gf),
            Feature::ProjAwayGa => projections.map(|p| p.away_ga),
            Feature::ProjDiffScore => projections.map(|p| p.diff_score),
            Feature::HomeStreak => self.home_streak.map(f64::from),
            Feature::AwayStreak => self.away_streak.map(f64::from),
            Feature::DiffStreak => self.diff_streak().map(f64::from),
        }
    }

    pub fn contains(&self, feature: Feature) -> bool {
        self.get(feature).is_some()
    }
}

/// Names of the features exported per game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Feature {
    ProjHomeGf,
    ProjHomeGa,
    ProjAwayGf,
    ProjAwayGa,
    ProjDiffScore,
    HomeStreak,
    AwayStreak,
    DiffStreak,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::ProjHomeGf,
        Feature::ProjHomeGa,
        Feature::ProjAwayGf,
        Feature::ProjAwayGa,
        Feature::ProjDiffScore,
        Feature::HomeStreak,
        Feature::AwayStreak,
        Feature::DiffStreak,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::ProjHomeGf => "proj_home_GF",
            Feature::ProjHomeGa => "proj_home_GA",
            Feature::ProjAwayGf => "proj_away_GF",
            Feature::ProjAwayGa => "proj_away_GA",
            Feature::ProjDiffScore => "proj_diff_score",
            Feature::HomeStreak => "home_streak",
            Feature::AwayStreak => "away_streak",
            Feature::DiffStreak => "diff_streak",
        }
    }
}

impl FromStr for Feature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Feature> {
        Feature::ALL
            .iter()
            .copied()
            .find(|feature| feature.name() == s)
            .ok_or_else(|| Error::invalid("feature", s))
    }
}

impl TryFrom<String> for Feature {
    type Error = Error;

    fn try_from(s: String) -> Result<Feature> {
        s.parse()
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    date: NaiveDate,
    away: String,
    home: String,
    away_goals: u32,
    home_goals: u32,
    result: ResultKind,
    features: Features,
}

impl Game {
    pub fn new(record: GameRecord) -> Game {
        Game {
            date: record.date,
            away: record.away,
            home: record.home,
            away_goals: record.away_goals,
            home_goals: record.home_goals,
            result: record.result,
            features: Features::default(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn home(&self) -> &str {
        &self.home
    }

    pub fn away(&self) -> &str {
        &self.away
    }

    pub fn home_goals(&self) -> u32 {
        self.home_goals
    }

    pub fn away_goals(&self) -> u32 {
        self.away_goals
    }

    pub fn result(&self) -> ResultKind {
        self.result
    }

    pub fn features(&self) -> &Features {
        &self.features
    }

    pub(crate) fn matches_record(&self, record: &GameRecord) -> bool {
        self.date == record.date
            && self.away == record.away
            && self.home == record.home
            && self.away_goals == record.away_goals
            && self.home_goals == record.home_goals
            && self.result == record.result
    }

    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn has_team(&self, team: &str) -> bool {
        self.home == team || self.away == team
    }

    pub fn side_of(&self, team: &str) -> Result<Side> {
        if team == self.home {
            Ok(Side::Home)
        } else if team == self.away {
            Ok(Side::Away)
        } else {
            Err(Error::NotAParticipant {
                team: team.to_owned(),
                game: self.to_string(),
            })
        }
    }

    pub fn opponent_of(&self, team: &str) -> Result<&str> {
        Ok(self.team(self.side_of(team)?.opposite()))
    }

    pub fn ended_in_regulation(&self) -> bool {
        self.result == ResultKind::Regulation
    }

    pub fn ended_in_overtime(&self) -> bool {
        self.result == ResultKind::Overtime
    }

    pub fn ended_in_shootout(&self) -> bool {
        self.result == ResultKind::Shootout
    }

    pub fn outcome(&self) -> Result<Outcome> {
        if self.ended_in_shootout() {
            return Ok(Outcome::ShootoutDecided);
        }
        match self.winning_side()? {
            Some(Side::Home) => Ok(Outcome::HomeWin),
            Some(Side::Away) => Ok(Outcome::AwayWin),
            None => Err(Error::TiedWithoutShootout(self.to_string())),
        }
    }

    /// Side with more recorded goals, shootout goal included. `None` only for a
    /// shootout game whose deciding goal has not been added yet.
    pub fn winning_side(&self) -> Result<Option<Side>> {
        match self.home_goals.cmp(&self.away_goals) {
            Ordering::Greater => Ok(Some(Side::Home)),
            Ordering::Less => Ok(Some(Side::Away)),
            Ordering::Equal if self.ended_in_shootout() => Ok(None),
            Ordering::Equal => Err(Error::TiedWithoutShootout(self.to_string())),
        }
    }

    pub fn winner(&self) -> Result<Option<&str>> {
        Ok(self.winning_side()?.map(|side| self.team(side)))
    }

    pub fn loser(&self) -> Result<Option<&str>> {
        Ok(self.winning_side()?.map(|side| self.team(side.opposite())))
    }

    /// `Some(true)` if `team` won, `Some(false)` if it lost, `None` for an
    /// unresolved shootout.
    pub fn won_by(&self, team: &str) -> Result<Option<bool>> {
        let side = self.side_of(team)?;
        Ok(self.winning_side()?.map(|winner| winner == side))
    }

    pub fn goals_for(&self, team: &str, include_shootout_goal: bool) -> Result<u32> {
        let side = self.side_of(team)?;
        if self.ended_in_shootout() && !include_shootout_goal {
            return Ok(self.home_goals.min(self.away_goals));
        }
        Ok(self.goals(side))
    }

    pub fn goals_against(&self, team: &str, include_shootout_goal: bool) -> Result<u32> {
        let side = self.side_of(team)?;
        if self.ended_in_shootout() && !include_shootout_goal {
            return Ok(self.home_goals.min(self.away_goals));
        }
        Ok(self.goals(side.opposite()))
    }

    fn goals(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home_goals,
            Side::Away => self.away_goals,
        }
    }

    /// Home minus away goals; positive values are home wins.
    pub fn diff_score(&self, include_shootout_goal: bool) -> i64 {
        if self.ended_in_shootout() && !include_shootout_goal {
            0
        } else {
            i64::from(self.home_goals) - i64::from(self.away_goals)
        }
    }

    pub fn numerical_result(&self) -> Result<ResultClass> {
        Ok(match self.outcome()? {
            Outcome::ShootoutDecided => ResultClass::Shootout,
            Outcome::HomeWin | Outcome::AwayWin => ResultClass::Decided,
        })
    }

    pub fn insert_projections(&mut self, projections: Projections) {
        self.features.projections = Some(projections);
    }

    pub fn insert_streak(&mut self, streak: i32, side: Side) {
        match side {
            Side::Home => self.features.home_streak = Some(streak),
            Side::Away => self.features.away_streak = Some(streak),
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.away,
            self.home,
            self.away_goals,
            self.home_goals,
            self.diff_score(false),
            self.result,
        )?;
        if let Some(projections) = &self.features.projections {
            write!(f, " | dp={}", projections.diff_score)?;
        }
        if let (Some(home), Some(away)) = (self.features.home_streak, self.features.away_streak) {
            write!(f, " | st={} {}", away, home)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn record(
    date: &str,
    away: &str,
    home: &str,
    away_goals: u32,
    home_goals: u32,
    result: &str,
) -> GameRecord {
    GameRecord {
        date: date.parse().unwrap(),
        away: away.to_owned(),
        home: home.to_owned(),
        away_goals,
        home_goals,
        result: result.parse().unwrap(),
    }
}

#[cfg(test)]
mod tests {
    use super::{record, Error, Feature, Game, Outcome, Projections, ResultClass, ResultKind, Side};

    fn game(away_goals: u32, home_goals: u32, result: &str) -> Game {
        Game::new(record("2010-10-31", "CHI", "DET", away_goals, home_goals, result))
    }

    #[test]
    fn test_winner_and_loser() {
        let g = game(2, 4, "R");
        assert_eq!(g.winner().unwrap(), Some("DET"));
        assert_eq!(g.loser().unwrap(), Some("CHI"));
        assert_eq!(g.outcome().unwrap(), Outcome::HomeWin);

        let g = game(3, 2, "OT");
        assert_eq!(g.winner().unwrap(), Some("CHI"));
        assert_eq!(g.loser().unwrap(), Some("DET"));
        assert_eq!(g.outcome().unwrap(), Outcome::AwayWin);

        // shootout winner still comes from the full score
        let g = game(3, 4, "SO");
        assert_eq!(g.winner().unwrap(), Some("DET"));
        assert_eq!(g.outcome().unwrap(), Outcome::ShootoutDecided);

        let g = game(3, 3, "SO");
        assert_eq!(g.winner().unwrap(), None);
        assert_eq!(g.loser().unwrap(), None);
    }

    #[test]
    fn test_tied_without_shootout() {
        let g = game(2, 2, "R");
        assert!(matches!(g.winner(), Err(Error::TiedWithoutShootout(_))));
        assert!(matches!(g.outcome(), Err(Error::TiedWithoutShootout(_))));
        assert!(g.numerical_result().is_err());
    }

    #[test]
    fn test_goals_for_against() {
        let g = game(2, 5, "R");
        assert_eq!(g.goals_for("DET", false).unwrap(), 5);
        assert_eq!(g.goals_against("DET", false).unwrap(), 2);
        assert_eq!(g.goals_for("CHI", false).unwrap(), 2);
        assert_eq!(g.goals_against("CHI", false).unwrap(), 5);

        let g = game(3, 2, "SO");
        assert_eq!(g.goals_for("CHI", false).unwrap(), 2);
        assert_eq!(g.goals_against("CHI", false).unwrap(), 2);
        assert_eq!(g.goals_for("DET", false).unwrap(), 2);
        assert_eq!(g.goals_for("CHI", true).unwrap(), 3);
        assert_eq!(g.goals_against("DET", true).unwrap(), 3);

        assert!(matches!(
            g.goals_for("TOR", false),
            Err(Error::NotAParticipant { .. })
        ));
        assert!(g.goals_against("TOR", true).is_err());
    }

    #[test]
    fn test_diff_score() {
        assert_eq!(game(2, 5, "R").diff_score(false), 3);
        assert_eq!(game(4, 3, "OT").diff_score(false), -1);
        assert_eq!(game(4, 3, "SO").diff_score(false), 0);
        assert_eq!(game(4, 3, "SO").diff_score(true), -1);
    }

    #[test]
    fn test_numerical_result() {
        assert_eq!(game(1, 2, "R").numerical_result().unwrap(), ResultClass::Decided);
        assert_eq!(game(3, 2, "OT").numerical_result().unwrap(), ResultClass::Decided);
        assert_eq!(game(3, 2, "SO").numerical_result().unwrap(), ResultClass::Shootout);
        assert_eq!(ResultClass::Shootout as u8, 1);
    }

    #[test]
    fn test_insert_streak() {
        let mut g = game(1, 2, "R");
        g.insert_streak(3, Side::Home);
        assert_eq!(g.features().home_streak, Some(3));
        assert_eq!(g.features().diff_streak(), None);
        assert!(!g.features().contains(Feature::DiffStreak));

        g.insert_streak(-2, Side::Away);
        g.insert_streak(-2, Side::Away);
        assert_eq!(g.features().away_streak, Some(-2));
        assert_eq!(g.features().diff_streak(), Some(5));
        assert_eq!(g.features().get(Feature::DiffStreak), Some(5.0));
    }

    #[test]
    fn test_insert_projections() {
        let mut g = game(1, 2, "R");
        assert!(!g.features().contains(Feature::ProjDiffScore));
        let projections = Projections {
            home_gf: 3.0,
            home_ga: 2.0,
            away_gf: 2.5,
            away_ga: 3.5,
            diff_score: 1.0,
        };
        g.insert_projections(projections);
        g.insert_projections(projections);
        assert_eq!(g.features().projections, Some(projections));
        assert_eq!(g.features().get(Feature::ProjAwayGa), Some(3.5));
        assert_eq!(g.features().get(Feature::HomeStreak), None);
    }

    #[test]
    fn test_parse_vocabulary() {
        assert_eq!("SO".parse::<ResultKind>().unwrap(), ResultKind::Shootout);
        assert!("S/O".parse::<ResultKind>().is_err());
        assert_eq!("away".parse::<Side>().unwrap(), Side::Away);
        assert!(matches!(
            "visitor".parse::<Side>(),
            Err(Error::InvalidArgument { kind: "side", .. })
        ));
        for feature in &Feature::ALL {
            assert_eq!(feature.name().parse::<Feature>().unwrap(), *feature);
        }
        assert!("pdScore".parse::<Feature>().is_err());
    }

    #[test]
    fn test_display() {
        let mut g = game(2, 3, "R");
        assert_eq!(g.to_string(), "2010-10-31 CHI DET 2 3 1 R");
        g.insert_streak(1, Side::Home);
        g.insert_streak(-4, Side::Away);
        assert_eq!(g.to_string(), "2010-10-31 CHI DET 2 3 1 R | st=-4 1");
    }
}
