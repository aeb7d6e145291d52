use std::ops::Index;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;

pub const PUBLISHED_FORMAT: &str = "%Y-%m-%d";

fn to_int<T: std::str::FromStr>(num_str: &str, date_str: &str) -> Result<T, String> {
    match num_str.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => Err(format!("Error parsing {} from the date {}", num_str, date_str)),
    }
}

/// Parses a `Published` value. The time part is optional and defaults to midnight.
pub fn parse_published(buf: &str) -> Result<NaiveDateTime, String> {
    lazy_static! {
        static ref DATE_REGEX: Regex = Regex::new(
            r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[ T](\d{1,2}):(\d{1,2})(?::(\d{1,2}))?(?:\.\d{0,3})?)?$"
        ).unwrap();
    }

    let buf = buf.trim();
    let Some(caps) = DATE_REGEX.captures(buf) else {
        return Err(format!("Unable to parse date time {}", buf));
    };

    let to_i32 = |num_str: &str| to_int::<i32>(num_str, buf);
    let to_u32 = |num_str: &str| to_int::<u32>(num_str, buf);

    let y: i32 = to_i32(caps.index(1))?;
    let m: u32 = to_u32(caps.index(2))?;
    let d: u32 = to_u32(caps.index(3))?;
    let h: u32 = caps.get(4).map_or(Ok(0), |x| to_u32(x.as_str()))?;
    let mn: u32 = caps.get(5).map_or(Ok(0), |x| to_u32(x.as_str()))?;
    let s: u32 = caps.get(6).map_or(Ok(0), |x| to_u32(x.as_str()))?;

    let Some(date) = NaiveDate::from_ymd_opt(y, m, d) else {
        return Err(format!("Invalid date {}", buf));
    };
    let Some(time) = NaiveTime::from_hms_opt(h, mn, s) else {
        return Err(format!("Invalid time {}", buf));
    };

    Ok(NaiveDateTime::new(date, time))
}

pub fn format_published(date_time: &NaiveDateTime) -> String {
    date_time.format(PUBLISHED_FORMAT).to_string()
}

/// e.g. `Monday, February 26, 2024`
pub fn format_long_date(date_time: &NaiveDateTime) -> String {
    date_time.format("%A, %B %-d, %Y").to_string()
}
