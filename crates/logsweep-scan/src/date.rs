//! Date-prefix file name grammar.

use chrono::NaiveDate;
use regex::Regex;

/// Matcher for the date-prefix grammar: four digits, underscore, two digits,
/// underscore, two digits, an arbitrary suffix, and a required extension.
///
/// `2024_03_20_server.log`, `2024_08_27.adminrequest.log` and
/// `2024_08_03.log` all match with the default `log` extension.
#[derive(Debug, Clone)]
pub struct DateMatcher {
    regex: Regex,
}

impl DateMatcher {
    /// Create a matcher requiring the given extension (without the dot).
    pub fn new(extension: &str) -> Self {
        let pattern = format!(
            r"^(\d{{4}})_(\d{{2}})_(\d{{2}}).*\.{}$",
            regex::escape(extension)
        );
        // The pattern is built from a fixed template plus an escaped literal,
        // so compilation cannot fail.
        let regex = Regex::new(&pattern).expect("date grammar regex");
        Self { regex }
    }

    /// Parse the embedded date out of a file name.
    ///
    /// Returns `None` when the name does not match the grammar, or when the
    /// digits do not form a real calendar date (`2024_13_45_x.log` is
    /// excluded the same way a non-matching name is).
    pub fn parse(&self, name: &str) -> Option<NaiveDate> {
        let caps = self.regex.captures(name)?;
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// Whether a file name matches the grammar and encodes a valid date.
    pub fn matches(&self, name: &str) -> bool {
        self.parse(name).is_some()
    }
}

impl Default for DateMatcher {
    fn default() -> Self {
        Self::new(logsweep_core::DEFAULT_EXTENSION)
    }
}
