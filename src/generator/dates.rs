use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;

/// How a date is rendered in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `YYYY-MM-DD`
    Iso,
    /// `DD/MM/YYYY`
    DayFirst,
}

impl DateStyle {
    pub fn pattern(&self) -> &'static str {
        match self {
            DateStyle::Iso => "%Y-%m-%d",
            DateStyle::DayFirst => "%d/%m/%Y",
        }
    }
}

/// A calendar date together with the surface format it is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordDate {
    pub date: NaiveDate,
    pub style: DateStyle,
}

impl RecordDate {
    pub fn iso(date: NaiveDate) -> Self {
        Self {
            date,
            style: DateStyle::Iso,
        }
    }

    pub fn day_first(date: NaiveDate) -> Self {
        Self {
            date,
            style: DateStyle::DayFirst,
        }
    }

    /// Same date, rewritten in another style
    pub fn restyled(self, style: DateStyle) -> Self {
        Self { style, ..self }
    }
}

impl fmt::Display for RecordDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format(self.style.pattern()))
    }
}

impl Serialize for RecordDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
