use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc, Weekday};
use tracing::debug;

pub const BUILD_DATE_LABEL: &str = "Build Date";

const DATE_FORMAT_24H: &str = "%d %b %Y %H:%M:%S";
const DATE_FORMAT_12H: &str = "%d %b %Y %I:%M:%S %p";

/// Offsets in seconds east of UTC for abbreviations pacman is likely to print.
const ZONE_ABBREVIATIONS: &[(&str, i32)] = &[
    ("UTC", 0),
    ("UT", 0),
    ("GMT", 0),
    ("Z", 0),
    ("WET", 0),
    ("WEST", 3600),
    ("BST", 3600),
    ("CET", 3600),
    ("CEST", 2 * 3600),
    ("EET", 2 * 3600),
    ("EEST", 3 * 3600),
    ("MSK", 3 * 3600),
    ("JST", 9 * 3600),
    ("KST", 9 * 3600),
    ("AEST", 10 * 3600),
    ("AEDT", 11 * 3600),
    ("NZST", 12 * 3600),
    ("NZDT", 13 * 3600),
    ("AST", -4 * 3600),
    ("EST", -5 * 3600),
    ("EDT", -4 * 3600),
    ("CST", -6 * 3600),
    ("CDT", -5 * 3600),
    ("MST", -7 * 3600),
    ("MDT", -6 * 3600),
    ("PST", -8 * 3600),
    ("PDT", -7 * 3600),
    ("AKST", -9 * 3600),
    ("AKDT", -8 * 3600),
    ("HST", -10 * 3600),
];

/// Parses the text pacman prints for `-Qu` and `-Si`.
pub struct PacmanParser;

impl PacmanParser {
    /// Package names from a `pacman -Qu` listing.
    ///
    /// Every non-blank line contributes its first whitespace-delimited token,
    /// e.g. `"linux 6.9.1-1 -> 6.9.2-1"` yields `"linux"`. Order is preserved.
    pub fn parse_pending_names(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter_map(|line| line.split_whitespace().next())
            .map(str::to_string)
            .collect()
    }

    /// Build date from a `pacman -Si` info block.
    ///
    /// Only the first `Build Date` line is considered.
    pub fn parse_build_date(text: &str) -> Option<DateTime<Utc>> {
        let line = text
            .lines()
            .map(str::trim)
            .find(|line| line.starts_with(BUILD_DATE_LABEL))?;

        let (_, value) = line.split_once(':')?;
        let parsed = Self::parse_timestamp(value.trim());
        if parsed.is_none() {
            debug!("Could not parse build date: {:?}", value.trim());
        }
        parsed
    }

    /// Parses `Mon 01 Jan 2024 12:00:00 UTC`, also accepting a 12-hour clock
    /// (`Mon 01 Jan 2024 12:00:00 PM UTC`) as printed by some locales.
    pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
        let tokens: Vec<&str> = value.split_whitespace().collect();
        let (weekday, rest) = tokens.split_first()?;
        let (zone, date_time) = rest.split_last()?;

        // The weekday must be well formed but is not checked against the date.
        weekday.parse::<Weekday>().ok()?;

        let format = match date_time.len() {
            4 => DATE_FORMAT_24H,
            5 => DATE_FORMAT_12H,
            _ => return None,
        };
        let naive = NaiveDateTime::parse_from_str(&date_time.join(" "), format).ok()?;
        let offset = FixedOffset::east_opt(Self::zone_offset_seconds(zone)?)?;

        offset
            .from_local_datetime(&naive)
            .single()
            .map(|date| date.with_timezone(&Utc))
    }

    /// Offset of a zone abbreviation or a numeric `+hhmm` offset.
    ///
    /// Unknown alphabetic abbreviations resolve to UTC.
    fn zone_offset_seconds(zone: &str) -> Option<i32> {
        if let Some((_, offset)) = ZONE_ABBREVIATIONS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(zone))
        {
            return Some(*offset);
        }

        if let Some(sign) = zone.chars().next().filter(|c| *c == '+' || *c == '-') {
            let digits = &zone[1..];
            if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            let hours: i32 = digits[..2].parse().ok()?;
            let minutes: i32 = digits[2..].parse().ok()?;
            let seconds = hours * 3600 + minutes * 60;
            return Some(if sign == '-' { -seconds } else { seconds });
        }

        if zone.chars().all(|c| c.is_ascii_alphabetic()) {
            debug!("Unknown time zone abbreviation {}, assuming UTC", zone);
            return Some(0);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SI_OUTPUT: &str = r#"Repository      : core
Name            : linux
Version         : 6.9.2.arch1-1
Description     : The Linux kernel and modules
Architecture    : x86_64
URL             : https://github.com/archlinux/linux
Licenses        : GPL-2.0-only
Download Size   : 137.54 MiB
Installed Size  : 135.78 MiB
Packager        : Jan Alexander Steffens (heftig) <heftig@archlinux.org>
Build Date      : Mon 01 Jan 2024 12:00:00 UTC
Validated By    : MD5 Sum  SHA-256 Sum  Signature
"#;

    #[test]
    fn test_parse_pending_names_should_take_first_token_of_each_line() {
        let names = PacmanParser::parse_pending_names("foo 1.0 2.0\n\nbar 2.1 2.2\n");
        assert_eq!(names, vec!["foo", "bar"]);
    }

    #[test]
    fn test_parse_pending_names_should_trim_and_skip_whitespace_only_lines() {
        let text = "   linux 6.9.1-1 -> 6.9.2-1\n \t \n\tmesa 1:24.1.0-1 -> 1:24.1.1-1  \n";
        let names = PacmanParser::parse_pending_names(text);
        assert_eq!(names, vec!["linux", "mesa"]);
    }

    #[test]
    fn test_parse_pending_names_should_keep_duplicates_and_order() {
        let names = PacmanParser::parse_pending_names("b 1\na 1\nb 2\n");
        assert_eq!(names, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_parse_pending_names_with_empty_input_should_return_empty() {
        assert!(PacmanParser::parse_pending_names("").is_empty());
        assert!(PacmanParser::parse_pending_names("\n\n  \n").is_empty());
    }

    #[test]
    fn test_parse_build_date_from_label_line() {
        let date = PacmanParser::parse_build_date("Build Date     : Mon 01 Jan 2024 12:00:00 UTC");
        assert_eq!(date, Some(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()));
    }

    #[test]
    fn test_parse_build_date_from_full_info_block() {
        let date = PacmanParser::parse_build_date(SI_OUTPUT);
        assert_eq!(date, Some(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()));
    }

    #[test]
    fn test_parse_build_date_without_label_should_return_none() {
        let text = "Name            : linux\nVersion         : 6.9.2.arch1-1\n";
        assert_eq!(PacmanParser::parse_build_date(text), None);
    }

    #[test]
    fn test_parse_build_date_with_garbage_value_should_return_none() {
        assert_eq!(PacmanParser::parse_build_date("Build Date : yesterday"), None);
        assert_eq!(PacmanParser::parse_build_date("Build Date"), None);
    }

    #[test]
    fn test_parse_build_date_first_label_wins() {
        let text = "Build Date : not a date\nBuild Date : Mon 01 Jan 2024 12:00:00 UTC\n";
        assert_eq!(PacmanParser::parse_build_date(text), None);
    }

    #[test]
    fn test_parse_timestamp_with_space_padded_day() {
        let date = PacmanParser::parse_timestamp("Tue  2 Jan 2024 08:30:15 UTC");
        assert_eq!(date, Some(Utc.with_ymd_and_hms(2024, 1, 2, 8, 30, 15).unwrap()));
    }

    #[test]
    fn test_parse_timestamp_with_twelve_hour_clock() {
        let date = PacmanParser::parse_timestamp("Mon 01 Jan 2024 01:15:00 PM UTC");
        assert_eq!(date, Some(Utc.with_ymd_and_hms(2024, 1, 1, 13, 15, 0).unwrap()));
    }

    #[test]
    fn test_parse_timestamp_should_apply_known_zone_offset() {
        let date = PacmanParser::parse_timestamp("Mon 01 Jan 2024 12:00:00 CET");
        assert_eq!(date, Some(Utc.with_ymd_and_hms(2024, 1, 1, 11, 0, 0).unwrap()));

        let date = PacmanParser::parse_timestamp("Mon 01 Jan 2024 12:00:00 est");
        assert_eq!(date, Some(Utc.with_ymd_and_hms(2024, 1, 1, 17, 0, 0).unwrap()));
    }

    #[test]
    fn test_parse_timestamp_with_numeric_offset() {
        let date = PacmanParser::parse_timestamp("Mon 01 Jan 2024 12:00:00 +0530");
        assert_eq!(date, Some(Utc.with_ymd_and_hms(2024, 1, 1, 6, 30, 0).unwrap()));
    }

    #[test]
    fn test_parse_timestamp_with_unknown_abbreviation_should_assume_utc() {
        let date = PacmanParser::parse_timestamp("Mon 01 Jan 2024 12:00:00 XYZT");
        assert_eq!(date, Some(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()));
    }

    #[test]
    fn test_parse_timestamp_with_invalid_parts_should_return_none() {
        assert_eq!(PacmanParser::parse_timestamp("Xyz 01 Jan 2024 12:00:00 UTC"), None);
        assert_eq!(PacmanParser::parse_timestamp("Mon 32 Jan 2024 12:00:00 UTC"), None);
        assert_eq!(PacmanParser::parse_timestamp("Mon 01 Jan 2024 12:00:00"), None);
        assert_eq!(PacmanParser::parse_timestamp("Mon 01 Jan 2024 12:00:00 +05"), None);
        assert_eq!(PacmanParser::parse_timestamp("2024-01-01T12:00:00Z"), None);
        assert_eq!(PacmanParser::parse_timestamp(""), None);
    }
}
