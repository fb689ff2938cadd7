//! Date patterns in the management console's `SimpleDateFormat` dialect
//!
//! Pattern letters are repeated to choose a width or a text style
//! (`yyyy-MM-dd'T'HH:mm:ss`). Text between single quotes is copied as is
//! and `''` stands for one quote. Other non-letters are literals.

use chrono::{DateTime, Datelike, FixedOffset, Timelike};

use crate::error::{RenderError, RenderResult};

/// Pattern used when no date format setting is present
pub const DEFAULT_DATE_PATTERN: &str = "yyyy-MM-dd'T'HH:mm:ss";

const SUPPORTED_LETTERS: &str = "GyYMLwWDdFEuaHkKhmsSzZX";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Field { letter: char, count: usize },
}

/// A parsed date pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    pattern: String,
    tokens: Vec<Token>,
}

impl DatePattern {
    /// Parse a pattern
    ///
    /// Fails on unterminated quotes and on letters that name no field.
    pub fn parse(pattern: &str) -> RenderResult<Self> {
        let mut tokens = Vec::new();
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '\'' {
                if chars.next_if_eq(&'\'').is_some() {
                    push_literal(&mut tokens, '\'');
                    continue;
                }
                let mut closed = false;
                while let Some(quoted) = chars.next() {
                    if quoted != '\'' {
                        push_literal(&mut tokens, quoted);
                    } else if chars.next_if_eq(&'\'').is_some() {
                        push_literal(&mut tokens, '\'');
                    } else {
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(RenderError::invalid_date_pattern(
                        pattern,
                        "unterminated quote",
                    ));
                }
            } else if c.is_ascii_alphabetic() {
                if !SUPPORTED_LETTERS.contains(c) {
                    return Err(RenderError::invalid_date_pattern(
                        pattern,
                        format!("illegal pattern character '{}'", c),
                    ));
                }
                let mut count = 1;
                while chars.next_if_eq(&c).is_some() {
                    count += 1;
                }
                tokens.push(Token::Field { letter: c, count });
            } else {
                push_literal(&mut tokens, c);
            }
        }

        Ok(Self {
            pattern: pattern.to_string(),
            tokens,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Format a date with this pattern
    pub fn format(&self, date: &DateTime<FixedOffset>) -> String {
        let mut out = String::with_capacity(self.pattern.len() + 8);
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Field { letter, count } => format_field(&mut out, date, *letter, *count),
            }
        }
        out
    }
}

fn push_literal(tokens: &mut Vec<Token>, c: char) {
    if let Some(Token::Literal(text)) = tokens.last_mut() {
        text.push(c);
    } else {
        tokens.push(Token::Literal(c.to_string()));
    }
}

fn pad(out: &mut String, value: u32, width: usize) {
    out.push_str(&format!("{:0width$}", value, width = width));
}

fn text(out: &mut String, full: &str, count: usize) {
    if count >= 4 {
        out.push_str(full);
    } else {
        out.extend(full.chars().take(3));
    }
}

fn format_field(out: &mut String, date: &DateTime<FixedOffset>, letter: char, count: usize) {
    match letter {
        'G' => out.push_str(if date.year_ce().0 { "AD" } else { "BC" }),
        'y' => push_year(out, date.year_ce().1, count),
        'Y' => {
            let (_, year) = date.year_ce();
            if rolls_into_next_year(date) {
                push_year(out, year + 1, count);
            } else {
                push_year(out, year, count);
            }
        }
        'M' | 'L' => {
            if count >= 3 {
                text(out, MONTHS[date.month0() as usize], count);
            } else {
                pad(out, date.month(), count);
            }
        }
        'd' => pad(out, date.day(), count),
        'F' => pad(out, date.day0() / 7 + 1, count),
        'W' => {
            let first = (date.weekday().num_days_from_sunday() + 35 - date.day0() % 7) % 7;
            pad(out, (date.day0() + first) / 7 + 1, count);
        }
        'H' => pad(out, date.hour(), count),
        'k' => pad(out, if date.hour() == 0 { 24 } else { date.hour() }, count),
        'K' => pad(out, date.hour() % 12, count),
        'h' => pad(out, date.hour12().1, count),
        'm' => pad(out, date.minute(), count),
        's' => pad(out, date.second(), count),
        'S' => pad(out, (date.nanosecond() / 1_000_000).min(999), count),
        'E' => text(
            out,
            WEEKDAYS[date.weekday().num_days_from_monday() as usize],
            count,
        ),
        'a' => out.push_str(if date.hour12().0 { "PM" } else { "AM" }),
        'D' => pad(out, date.ordinal(), count),
        'u' => pad(out, date.weekday().number_from_monday(), count),
        'w' => pad(out, week_of_year(date), count),
        'Z' => push_offset(out, date, false, true),
        'X' => {
            if date.offset().local_minus_utc() == 0 {
                out.push('Z');
            } else {
                push_offset(out, date, count >= 3, count >= 2);
            }
        }
        'z' => {
            if date.offset().local_minus_utc() == 0 {
                out.push_str("UTC");
            } else {
                out.push_str("GMT");
                push_offset(out, date, true, true);
            }
        }
        _ => {}
    }
}

fn push_year(out: &mut String, year: u32, count: usize) {
    if count == 2 {
        pad(out, year % 100, 2);
    } else {
        pad(out, year, count);
    }
}

/// Weeks start on Sunday and week 1 is the week holding January 1st
fn week_of_year(date: &DateTime<FixedOffset>) -> u32 {
    if rolls_into_next_year(date) {
        return 1;
    }
    let jan_first = (date.weekday().num_days_from_sunday() + 371 - date.ordinal0() % 7) % 7;
    (date.ordinal0() + jan_first) / 7 + 1
}

/// Whether the date's Sunday-based week already holds next January 1st
fn rolls_into_next_year(date: &DateTime<FixedOffset>) -> bool {
    let days_in_year = if date.date_naive().leap_year() { 366 } else { 365 };
    let until_next_year = days_in_year - date.ordinal0();
    date.weekday().num_days_from_sunday() + until_next_year <= 6
}

fn push_offset(out: &mut String, date: &DateTime<FixedOffset>, colon: bool, minutes: bool) {
    let seconds = date.offset().local_minus_utc();
    out.push(if seconds < 0 { '-' } else { '+' });
    let total_minutes = seconds.unsigned_abs() / 60;
    pad(out, total_minutes / 60, 2);
    if minutes {
        if colon {
            out.push(':');
        }
        pad(out, total_minutes % 60, 2);
    }
}
