use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Label preselected for every date field
pub const DEFAULT_DATE_FORMAT: &str = "January 27, 2026 (Full)";

/// The fixed set of date renderings a date field can choose from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateFormat {
    #[default]
    Full,
    Short,
    DayMonthYearDash,
    DayMonthYearSlash,
    Iso,
    MonthDayYearSlash,
    MonthDayYearDash,
}

impl DateFormat {
    /// Every format, in the order a picker lists them
    pub const ALL: [DateFormat; 7] = [
        DateFormat::Full,
        DateFormat::Short,
        DateFormat::DayMonthYearDash,
        DateFormat::DayMonthYearSlash,
        DateFormat::Iso,
        DateFormat::MonthDayYearSlash,
        DateFormat::MonthDayYearDash,
    ];

    /// Human-facing label, rendered with a sample date
    pub fn label(self) -> &'static str {
        match self {
            DateFormat::Full => "January 27, 2026 (Full)",
            DateFormat::Short => "Jan 27, 2026 (Short)",
            DateFormat::DayMonthYearDash => "27-01-2026 (DD-MM-YYYY)",
            DateFormat::DayMonthYearSlash => "27/01/2026 (DD/MM/YYYY)",
            DateFormat::Iso => "2026-01-27 (ISO)",
            DateFormat::MonthDayYearSlash => "01/27/2026 (MM/DD/YYYY)",
            DateFormat::MonthDayYearDash => "01-27-2026 (MM-DD-YYYY)",
        }
    }

    /// Pattern name the label stands for
    pub fn pattern(self) -> &'static str {
        match self {
            DateFormat::Full => "MMMM DD, YYYY",
            DateFormat::Short => "MMM DD, YYYY",
            DateFormat::DayMonthYearDash => "DD-MM-YYYY",
            DateFormat::DayMonthYearSlash => "DD/MM/YYYY",
            DateFormat::Iso => "YYYY-MM-DD",
            DateFormat::MonthDayYearSlash => "MM/DD/YYYY",
            DateFormat::MonthDayYearDash => "MM-DD-YYYY",
        }
    }

    /// Look up a format by its label or by its bare pattern
    pub fn lookup(label: &str) -> Option<DateFormat> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.label() == label || f.pattern() == label)
    }

    fn chrono_format(self) -> &'static str {
        match self {
            // Month-name renderings keep the day unpadded
            DateFormat::Full => "%B %-d, %Y",
            DateFormat::Short => "%b %-d, %Y",
            DateFormat::DayMonthYearDash => "%d-%m-%Y",
            DateFormat::DayMonthYearSlash => "%d/%m/%Y",
            DateFormat::Iso => "%Y-%m-%d",
            DateFormat::MonthDayYearSlash => "%m/%d/%Y",
            DateFormat::MonthDayYearDash => "%m-%d-%Y",
        }
    }

    pub fn render(self, date: NaiveDate) -> String {
        date.format(self.chrono_format()).to_string()
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parse calendar-date input (`YYYY-MM-DD`, or the date part of RFC 3339)
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(input).ok().map(|dt| dt.date_naive()))
}

/// Render a date input with the format named by `label`
///
/// Empty input renders as empty. An unknown label or input that is not a
/// calendar date returns the input unchanged.
pub fn format_date(input: &str, label: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    let Some(format) = DateFormat::lookup(label) else {
        debug!(label, "unknown date format, keeping raw input");
        return input.to_string();
    };
    match parse_date(input) {
        Some(date) => format.render(date),
        None => {
            debug!(input, "unparseable date, keeping raw input");
            input.to_string()
        }
    }
}
