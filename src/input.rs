use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::tracker::TrackerError;

/// Reads a manually typed price by keeping only its digits, so `9,700,000 gp` is accepted.
pub fn parse_price_input(text: &str) -> Result<u64, TrackerError> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().map_err(|_| TrackerError::InvalidPrice)
}

/// Builds the timestamp of a manual entry. Missing parts fall back to `now`; seconds are zeroed.
pub fn manual_timestamp(
    date: Option<&str>,
    time: Option<&str>,
    now: NaiveDateTime,
) -> Result<NaiveDateTime, TrackerError> {
    let date = match date {
        Some(date) => NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| TrackerError::InvalidDate)?,
        None => now.date(),
    };

    let (hour, minute) = match time {
        Some(time) => parse_hour_minute(time)?,
        None => (now.hour(), now.minute()),
    };

    let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or(TrackerError::InvalidTime)?;
    Ok(date.and_time(time))
}

fn parse_hour_minute(time: &str) -> Result<(u32, u32), TrackerError> {
    let (hour, minute) = time.trim().split_once(':').ok_or(TrackerError::InvalidTime)?;
    let hour: u32 = hour.trim().parse().map_err(|_| TrackerError::InvalidTime)?;
    let minute: u32 = minute.trim().parse().map_err(|_| TrackerError::InvalidTime)?;

    if hour > 23 || minute > 59 {
        return Err(TrackerError::InvalidTime);
    }

    Ok((hour, minute))
}
