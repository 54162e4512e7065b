use std::fmt::{self, Display};
use std::io;

/// Everything that can go wrong while building or running a simulation.
///
/// Construction errors (`UnknownRegion`, `InvalidPopulation`, ...) are fatal: a graph or a
/// parameter set that fails validation is never installed in a `Context`. Misusing the
/// driver's control surface is not an error; those commands are no-ops.
#[derive(Debug)]
pub enum SpreadError {
    /// A lookup or a neighbor list names a region that is not in the graph.
    UnknownRegion { name: String },
    /// A region's population is zero or negative.
    InvalidPopulation { name: String, population: i64 },
    DuplicateRegion { name: String },
    SelfNeighbor { name: String },
    /// An initial infected count is negative, not finite, or larger than the population.
    InvalidSeed { name: String, infected: f64 },
    EmptyGraph,
    InvalidParameter { name: &'static str, value: f64 },
    Logging(String),
    Io(io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
}

impl From<io::Error> for SpreadError {
    fn from(error: io::Error) -> Self {
        SpreadError::Io(error)
    }
}

impl From<serde_json::Error> for SpreadError {
    fn from(error: serde_json::Error) -> Self {
        SpreadError::Json(error)
    }
}

impl From<csv::Error> for SpreadError {
    fn from(error: csv::Error) -> Self {
        SpreadError::Csv(error)
    }
}

impl std::error::Error for SpreadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpreadError::Io(error) => Some(error),
            SpreadError::Json(error) => Some(error),
            SpreadError::Csv(error) => Some(error),
            _ => None,
        }
    }
}

impl Display for SpreadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpreadError::UnknownRegion { name } => write!(f, "unknown region: {name}"),
            SpreadError::InvalidPopulation { name, population } => write!(
                f,
                "region {name} has invalid population {population}; populations must be positive"
            ),
            SpreadError::DuplicateRegion { name } => {
                write!(f, "region {name} is defined more than once")
            }
            SpreadError::SelfNeighbor { name } => {
                write!(f, "region {name} lists itself as a neighbor")
            }
            SpreadError::InvalidSeed { name, infected } => {
                write!(f, "region {name} has invalid initial infected count {infected}")
            }
            SpreadError::EmptyGraph => {
                write!(f, "the region graph must contain at least one region")
            }
            SpreadError::InvalidParameter { name, value } => {
                write!(f, "invalid value {value} for parameter {name}")
            }
            SpreadError::Logging(message) => write!(f, "failed to configure logging: {message}"),
            SpreadError::Io(error) => write!(f, "I/O error: {error}"),
            SpreadError::Json(error) => write!(f, "JSON error: {error}"),
            SpreadError::Csv(error) => write!(f, "CSV error: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn display_names_the_region() {
        let error = SpreadError::InvalidPopulation { name: "Tachov".to_string(), population: 0 };
        assert!(error.to_string().contains("Tachov"));
        assert!(error.to_string().contains('0'));
    }

    #[test]
    fn io_errors_keep_their_source() {
        let error: SpreadError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(error, SpreadError::Io(_)));
        assert!(error.source().is_some());
    }
}
