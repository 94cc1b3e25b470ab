use serde::Deserialize;

pub mod grid;
pub mod source;

pub use grid::{Cell, Grid, WeekColumn, DAYS_PER_WEEK, MOCK_WEEKS};
pub use source::{ContributionSource, HttpContributionSource, RemoteUnavailable, StaticSource};

/// One day's recorded activity: a raw count plus a discretized intensity
/// level. The level arrives from the remote document and is carried verbatim,
/// defaulting to 0 when the document omits it; range enforcement happens at
/// grid construction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DayRecord {
    pub date: String,
    pub count: u64,
    #[serde(default)]
    pub level: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_defaults_to_zero_when_absent() {
        let day: DayRecord = serde_json::from_str(r#"{"date":"2024-01-01","count":5}"#).unwrap();
        assert_eq!(day.level, 0);
        assert_eq!(day.count, 5);
    }

    #[test]
    fn level_passes_through_verbatim() {
        let day: DayRecord =
            serde_json::from_str(r#"{"date":"2024-06-15","count":12,"level":9}"#).unwrap();
        assert_eq!(day.level, 9);
    }
}
