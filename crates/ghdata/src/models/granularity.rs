use std::fmt::{Display, Formatter};

use time::Date;

/// Time unit used to bucket timestamped rows before counting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Granularity {
    Day,
    #[default]
    Week,
    Month,
    Year,
}

impl Granularity {
    pub const ALL: [Self; 4] = [Self::Day, Self::Week, Self::Month, Self::Year];

    /// Accepts `day|week|month|year` or `d|w|m|y` in any case.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "D" | "DAY" => Some(Self::Day),
            "W" | "WEEK" => Some(Self::Week),
            "M" | "MONTH" => Some(Self::Month),
            "Y" | "YEAR" => Some(Self::Year),
            _ => None,
        }
    }

    /// Total version of [`Granularity::parse`]: anything unrecognized is `Week`.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_default()
    }

    /// SQL scalar function grouping a timestamp into this bucket.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Day => "DAY",
            Self::Week => "WEEK",
            Self::Month => "MONTH",
            Self::Year => "YEAR",
        }
    }

    /// Key shared by every date that falls in the same bucket.
    ///
    /// Weeks are ISO weeks, so the last days of December can belong to
    /// week 1 of the next year and early January to week 52/53 of the
    /// previous one.
    #[must_use]
    pub fn bucket_key(self, date: Date) -> String {
        match self {
            Self::Day => format!(
                "{:04}-{:02}-{:02}",
                date.year(),
                u8::from(date.month()),
                date.day()
            ),
            Self::Week => {
                let (iso_year, iso_week, _) = date.to_iso_week_date();
                format!("{iso_year:04}-W{iso_week:02}")
            }
            Self::Month => format!("{:04}-{:02}", date.year(), u8::from(date.month())),
            Self::Year => format!("{:04}", date.year()),
        }
    }
}

impl Display for Granularity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}
