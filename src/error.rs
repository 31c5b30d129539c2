use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid {kind}: {value:?}")]
    InvalidArgument { kind: &'static str, value: String },

    #[error("{team} did not play in {game}")]
    NotAParticipant { team: String, game: String },

    #[error("{team} has no game on {date}")]
    NoGameOnDate { team: String, date: NaiveDate },

    #[error("unknown team: {0}")]
    UnknownTeam(String),

    #[error("tied score without a shootout: {0}")]
    TiedWithoutShootout(String),

    #[error("team logs disagree on {0}")]
    ConflictingRecord(String),

    #[error("{game} is missing feature {feature}")]
    MissingFeature { feature: String, game: String },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn invalid(kind: &'static str, value: impl Into<String>) -> Error {
        Error::InvalidArgument {
            kind,
            value: value.into(),
        }
    }
}
