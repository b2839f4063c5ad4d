use chrono::{DateTime, Utc};

use crate::models::PackageInfo;

pub struct AgeFilter;

impl AgeFilter {
    /// Names of packages built more than `threshold_days` before `now`,
    /// sorted alphabetically.
    ///
    /// A package aged exactly `threshold_days` is not outdated. Packages with
    /// an unknown build date are never included.
    pub fn filter_outdated(
        infos: &[PackageInfo],
        threshold_days: u32,
        now: DateTime<Utc>,
    ) -> Vec<String> {
        let mut outdated: Vec<String> = infos
            .iter()
            .filter(|info| {
                info.age_in_days(now)
                    .is_some_and(|age| age > f64::from(threshold_days))
            })
            .map(|info| info.name.clone())
            .collect();
        outdated.sort();
        outdated
    }
}
