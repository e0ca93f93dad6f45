use std::fmt;

use chrono::{Datelike, NaiveDate};

const DURATION_SEPARATOR: &str = " · ";
const RANGE_SEPARATORS: [&str; 2] = [" - ", " – "];
const ONGOING_MARKER: &str = "Present";

/// Calendar month, the finest resolution profile date ranges carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthYear {
    year: i32,
    month: u32,
}

impl MonthYear {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Whole months from `self` to `later`; negative if `later` is earlier.
    pub fn months_until(&self, later: MonthYear) -> i64 {
        i64::from(later.year - self.year) * 12 + i64::from(later.month) - i64::from(self.month)
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEnd {
    Ongoing,
    Ended(MonthYear),
    /// End text was present but not a recognised date.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<MonthYear>,
    pub end: RangeEnd,
}

impl DateRange {
    /// `(start, end)` with an ongoing end resolved to `today`. `None` when
    /// either side is unknown.
    pub fn resolve(&self, today: MonthYear) -> Option<(MonthYear, MonthYear)> {
        let start = self.start?;
        match self.end {
            RangeEnd::Ongoing => Some((start, today)),
            RangeEnd::Ended(end) => Some((start, end)),
            RangeEnd::Unknown => None,
        }
    }
}

/// Parses `"Jan 2014"` or `"2014"` (January assumed).
pub fn parse_month_year(text: &str) -> Option<MonthYear> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(&format!("1 {text}"), "%d %b %Y") {
        return Some(MonthYear::from_date(date));
    }
    if text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit()) {
        return text.parse().ok().and_then(|year| MonthYear::new(year, 1));
    }
    None
}

/// Parses a caption such as `"Jan 2014 - Present · 10 yrs 2 mos"`.
///
/// Anything after the duration separator is ignored. A lone date is read as
/// a start with an ongoing end.
pub fn parse_date_range(text: &str) -> DateRange {
    let date_part = text.split(DURATION_SEPARATOR).next().unwrap_or(text);
    let split = RANGE_SEPARATORS
        .iter()
        .find_map(|sep| date_part.split_once(sep));

    match split {
        Some((start, end)) => DateRange {
            start: parse_month_year(start),
            end: if end.contains(ONGOING_MARKER) {
                RangeEnd::Ongoing
            } else {
                parse_month_year(end).map_or(RangeEnd::Unknown, RangeEnd::Ended)
            },
        },
        None => DateRange {
            start: parse_month_year(date_part),
            end: RangeEnd::Ongoing,
        },
    }
}

/// Span from the earliest start to the latest end across a set of ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExperienceTotal {
    months: i64,
}

impl ExperienceTotal {
    pub fn from_months(months: i64) -> Self {
        Self {
            months: months.max(0),
        }
    }

    pub fn months(&self) -> i64 {
        self.months
    }
}

/// Rendered as `years.months`: `0.7` below a year, `3.04` above.
impl fmt::Display for ExperienceTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let years = self.months / 12;
        let months = self.months % 12;
        if years == 0 {
            write!(f, "0.{months}")
        } else {
            write!(f, "{years}.{months:02}")
        }
    }
}

/// Ranges without a start or with an unrecognised end are ignored.
pub fn total_experience<'a, I>(ranges: I, today: MonthYear) -> ExperienceTotal
where
    I: IntoIterator<Item = &'a DateRange>,
{
    let spans = ranges.into_iter().filter_map(|range| range.resolve(today));
    let bounds = spans.fold(None, |acc: Option<(MonthYear, MonthYear)>, (start, end)| {
        Some(match acc {
            Some((lo, hi)) => (lo.min(start), hi.max(end)),
            None => (start, end),
        })
    });
    match bounds {
        Some((earliest, latest)) => ExperienceTotal::from_months(earliest.months_until(latest)),
        None => ExperienceTotal::default(),
    }
}
