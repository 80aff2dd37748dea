//! Parsing of displayed date ranges and tenure text
//!
//! Handles the forms profile pages show in experience and education entries:
//! `Jan 2018 - Present · 6 yrs 2 mos`, `Mar 2015 – Dec 2019`, `2015 - 2019`.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// Dates recovered from a displayed range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub is_current: bool,
}

fn date_token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)\b(?:(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{4})|(\d{4})|(present|current|now))\b",
        )
        .expect("date token pattern is a valid regex")
    })
}

fn tenure_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(\d+)\s*(yr|year|mo|month)").expect("tenure pattern is a valid regex")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Date(NaiveDate),
    Ongoing,
}

fn month_number(abbrev: &str) -> Option<u32> {
    let month = match abbrev.to_ascii_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn plausible_year(year: i32) -> bool {
    (1900..=2100).contains(&year)
}

fn tokens(text: &str) -> Vec<Token> {
    date_token_pattern()
        .captures_iter(text)
        .filter_map(|caps| {
            if caps.get(4).is_some() {
                return Some(Token::Ongoing);
            }
            if let (Some(month), Some(year)) = (caps.get(1), caps.get(2)) {
                let year: i32 = year.as_str().parse().ok()?;
                let month = month_number(month.as_str())?;
                return plausible_year(year)
                    .then(|| NaiveDate::from_ymd_opt(year, month, 1))
                    .flatten()
                    .map(Token::Date);
            }
            let year: i32 = caps.get(3)?.as_str().parse().ok()?;
            plausible_year(year)
                .then(|| NaiveDate::from_ymd_opt(year, 1, 1))
                .flatten()
                .map(Token::Date)
        })
        .collect()
}

/// Parses a displayed date range
///
/// The first date found is the start. The token after it is either the end
/// date or an ongoing marker (`Present`, `Current`, `Now`). Year-only dates
/// resolve to January 1st.
pub fn parse_date_range(text: &str) -> DateRange {
    let mut found = tokens(text).into_iter();

    let start = found.by_ref().find_map(|token| match token {
        Token::Date(date) => Some(date),
        Token::Ongoing => None,
    });
    if start.is_none() {
        return DateRange::default();
    }

    match found.next() {
        Some(Token::Date(end)) => DateRange {
            start,
            end: Some(end),
            is_current: false,
        },
        Some(Token::Ongoing) => DateRange {
            start,
            end: None,
            is_current: true,
        },
        None => DateRange {
            start,
            end: None,
            is_current: false,
        },
    }
}

/// Total months in tenure text such as `2 yrs 3 mos`
///
/// Returns None when the text mentions neither years nor months.
pub fn parse_tenure_months(text: &str) -> Option<u32> {
    let mut matched = false;
    let mut months = 0u32;

    for caps in tenure_pattern().captures_iter(text) {
        let Some(count) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) else {
            continue;
        };
        let unit = caps.get(2).map(|m| m.as_str().to_ascii_lowercase());
        match unit.as_deref() {
            Some("yr") | Some("year") => months = months.saturating_add(count.saturating_mul(12)),
            Some(_) => months = months.saturating_add(count),
            None => continue,
        }
        matched = true;
    }

    matched.then_some(months)
}

/// Four-digit years in order of appearance
pub fn years_in(text: &str) -> Vec<i32> {
    tokens(text)
        .into_iter()
        .filter_map(|token| match token {
            Token::Date(date) => Some(chrono::Datelike::year(&date)),
            Token::Ongoing => None,
        })
        .collect()
}
