use chrono::{Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

use crate::processing::script::ScriptNormalizer;

lazy_static! {
    // DD/MM/YYYY, DD.MM.YYYY, DD-MM-YYYY; OCR sometimes puts spaces around separators
    static ref NUMERIC_DATE: Regex =
        Regex::new(r"(\d{1,2})\s*[./-]\s*(\d{1,2})\s*[./-]\s*(\d{4})").unwrap();
    // DD Month YYYY, in any script
    static ref TEXTUAL_DATE: Regex =
        Regex::new(r"(\d{1,2})\.?\s+(\p{L}{3,12})\.?,?\s+(\d{4})").unwrap();
}

/// Finds a date in `text` and normalizes it to `DD.MM.YYYY`. Impossible
/// dates and dates in the future are rejected.
pub fn parse_date(text: &str) -> Option<String> {
    let date = parse_numeric(text).or_else(|| parse_textual(text))?;
    if date > Local::now().date_naive() {
        return None;
    }
    Some(date.format("%d.%m.%Y").to_string())
}

fn parse_numeric(text: &str) -> Option<NaiveDate> {
    let captures = NUMERIC_DATE.captures(text)?;
    let day = captures.get(1)?.as_str().parse::<u32>().ok()?;
    let month = captures.get(2)?.as_str().parse::<u32>().ok()?;
    let year = captures.get(3)?.as_str().parse::<i32>().ok()?;
    plausible(year, month, day)
}

fn parse_textual(text: &str) -> Option<NaiveDate> {
    let captures = TEXTUAL_DATE.captures(text)?;
    let day = captures.get(1)?.as_str().parse::<u32>().ok()?;
    let month = month_number(captures.get(2)?.as_str())?;
    let year = captures.get(3)?.as_str().parse::<i32>().ok()?;
    plausible(year, month, day)
}

fn plausible(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if year < 1900 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Month number for English, Bosnian/Serbian and Croatian month names, in
/// Latin or Cyrillic script, full or abbreviated to three letters.
fn month_number(name: &str) -> Option<u32> {
    let canonical = ScriptNormalizer::to_canonical(name);
    let month = match canonical.as_str() {
        "jan" | "january" | "januar" | "sijecanj" | "sij" => 1,
        "feb" | "february" | "februar" | "veljaca" | "velj" => 2,
        "mar" | "march" | "mart" | "ozujak" | "ozu" => 3,
        "apr" | "april" | "travanj" | "tra" => 4,
        "may" | "maj" | "svibanj" | "svi" => 5,
        "jun" | "june" | "juni" | "lipanj" | "lip" => 6,
        "jul" | "july" | "juli" | "srpanj" | "srp" => 7,
        "aug" | "august" | "avg" | "avgust" | "kolovoz" | "kol" => 8,
        "sep" | "sept" | "september" | "septembar" | "rujan" | "ruj" => 9,
        "oct" | "october" | "okt" | "oktobar" | "listopad" | "lis" => 10,
        "nov" | "november" | "novembar" | "studeni" | "stu" => 11,
        "dec" | "december" | "decembar" | "prosinac" | "pro" => 12,
        _ => return None,
    };
    Some(month)
}
