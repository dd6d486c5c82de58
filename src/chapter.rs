//! Chapter numbers and chapter range selection.
//!
//! Catalog chapters are decimal values (`10`, `10.5`). A [`ChapterNumber`]
//! renders in its minimal form, with no trailing zeros and no trailing
//! decimal point, which is also the form used in chapter URLs and
//! directory names.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a string is not a finite decimal chapter number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid chapter number '{input}': expected a decimal value such as 12 or 10.5")]
pub struct ChapterParseError {
    /// The rejected input.
    pub input: String,
}

/// A finite decimal chapter number.
///
/// Ordering is total; `-0.0` is normalized to `0.0` on construction so equal
/// values compare and display identically.
#[derive(Debug, Clone, Copy)]
pub struct ChapterNumber(f64);

impl ChapterNumber {
    /// Creates a chapter number, returning `None` for NaN or infinite values.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        // Adding +0.0 turns -0.0 into +0.0 and leaves every other value unchanged.
        Some(Self(value + 0.0))
    }

    /// Returns the numeric value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for ChapterNumber {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ChapterNumber {}

impl PartialOrd for ChapterNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChapterNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for ChapterNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f64's Display is the shortest round-trip form: 10.0 -> "10", 10.50 -> "10.5".
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChapterNumber {
    type Err = ChapterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || ChapterParseError {
            input: s.to_string(),
        };
        // f64::from_str also accepts "inf"/"nan"; those are rejected by `new`.
        let value: f64 = trimmed.parse().map_err(|_| err())?;
        Self::new(value).ok_or_else(err)
    }
}

/// Inclusive chapter bounds requested by the user.
///
/// - The lower bound defaults to `0`. It filters only when it is `>= 0`, so a
///   negative lower bound disables lower filtering.
/// - The upper bound filters only when it is `>=` the effective lower bound.
///   An upper bound below the lower bound is ignored entirely, which makes
///   the range unbounded above.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChapterRange {
    lower: Option<ChapterNumber>,
    upper: Option<ChapterNumber>,
}

impl ChapterRange {
    /// Creates a range from optional bounds.
    #[must_use]
    pub fn new(lower: Option<ChapterNumber>, upper: Option<ChapterNumber>) -> Self {
        Self { lower, upper }
    }

    /// Range that keeps every non-negative chapter.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Parses bounds given as numeric strings.
    ///
    /// # Errors
    ///
    /// Returns [`ChapterParseError`] if either bound is not a finite decimal.
    pub fn parse(lower: Option<&str>, upper: Option<&str>) -> Result<Self, ChapterParseError> {
        let lower = lower.map(str::parse).transpose()?;
        let upper = upper.map(str::parse).transpose()?;
        Ok(Self::new(lower, upper))
    }

    fn effective_lower(self) -> f64 {
        self.lower.map_or(0.0, ChapterNumber::value)
    }

    /// Returns the upper bound if it takes part in filtering.
    #[must_use]
    pub fn applied_upper(self) -> Option<ChapterNumber> {
        self.upper
            .filter(|upper| upper.value() >= self.effective_lower())
    }

    /// Returns true if `chapter` falls inside the range.
    #[must_use]
    pub fn contains(self, chapter: ChapterNumber) -> bool {
        let lower = self.effective_lower();
        if lower >= 0.0 && chapter.value() < lower {
            return false;
        }
        match self.applied_upper() {
            Some(upper) => chapter <= upper,
            None => true,
        }
    }

    /// Filters, sorts ascending, and de-duplicates chapters.
    #[must_use]
    pub fn select<I>(self, chapters: I) -> Vec<ChapterNumber>
    where
        I: IntoIterator<Item = ChapterNumber>,
    {
        let mut selected: Vec<ChapterNumber> = chapters
            .into_iter()
            .filter(|chapter| self.contains(*chapter))
            .collect();
        selected.sort_unstable();
        selected.dedup();
        selected
    }
}
