use crate::SearchError;
use geodesy::GeoPoint;

/// Terminal result of one search.
#[derive(Debug)]
pub enum SearchOutcome {
    /// First sample where the terrain rose through the sight line.
    Intersection(GeoPoint),

    /// No qualifying intersection within range; the sample that came
    /// closest to the sight line. Low confidence.
    Fallback(GeoPoint),

    Failed(SearchError),
}

impl SearchOutcome {
    /// Returns the located point for either successful outcome.
    pub fn point(&self) -> Option<GeoPoint> {
        match self {
            Self::Intersection(point) | Self::Fallback(point) => Some(*point),
            Self::Failed(_) => None,
        }
    }

    pub fn is_intersection(&self) -> bool {
        matches!(self, Self::Intersection(_))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    pub fn error(&self) -> Option<&SearchError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<Result<SearchOutcome, SearchError>> for SearchOutcome {
    fn from(res: Result<SearchOutcome, SearchError>) -> Self {
        res.unwrap_or_else(Self::Failed)
    }
}
