use chrono::{DateTime, Utc};

/// Build metadata of a pending package.
///
/// `build_date` is `None` when pacman printed no `Build Date` line or the
/// value could not be parsed. Such packages have an unknown age and are never
/// reported as outdated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub build_date: Option<DateTime<Utc>>,
}

impl PackageInfo {
    pub fn new(name: impl Into<String>, build_date: Option<DateTime<Utc>>) -> Self {
        Self {
            name: name.into(),
            build_date,
        }
    }

    /// Age in fractional days relative to `now`, if the build date is known.
    pub fn age_in_days(&self, now: DateTime<Utc>) -> Option<f64> {
        self.build_date.map(|build_date| {
            let hours = (now - build_date).num_milliseconds() as f64 / 3_600_000.0;
            hours / 24.0
        })
    }
}

/// Result of a single fetch task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Fetched(PackageInfo),
    Skipped { name: String, reason: String },
}

impl FetchOutcome {
    pub fn name(&self) -> &str {
        match self {
            FetchOutcome::Fetched(info) => &info.name,
            FetchOutcome::Skipped { name, .. } => name,
        }
    }

    pub fn into_info(self) -> Option<PackageInfo> {
        match self {
            FetchOutcome::Fetched(info) => Some(info),
            FetchOutcome::Skipped { .. } => None,
        }
    }
}

/// Terminal state of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NothingToDo,
    Cancelled,
    Updated(Vec<String>),
}
