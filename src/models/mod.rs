mod package;

pub use package::{FetchOutcome, Outcome, PackageInfo};
