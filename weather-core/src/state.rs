use crate::model::WeatherSnapshot;

/// Progress of one fetch as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Loading,
    Success(WeatherSnapshot),
    /// Display message: server body text, or the underlying failure.
    Failure(String),
}

impl FetchState {
    /// `Success` and `Failure` end a fetch.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Loading)
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            Self::Success(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}
