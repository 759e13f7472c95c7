//! Time-slot rows and the transform that turns them into schedule grid entries.
//!
//! A time-slot row carries its start time in the `name` field. The end time
//! is always start + [`SLOT_DURATION_MINUTES`]; wrapping past midnight keeps
//! the hour modulo 24 and does not move to the next day.

use crate::constants::schedule::SLOT_DURATION_MINUTES;
use crate::domain::LookupId;
use crate::error::LookupError;
use crate::models::lookup::LookupRow;
use serde::Serialize;

const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    id: LookupId,
    code: String,
    start_time: String,
    end_time: String,
    display_time: String,
}

impl TimeSlot {
    pub fn from_row(row: &LookupRow) -> Result<Self, LookupError> {
        let start_time = normalize_time(&row.name)?;
        let end_time = add_minutes(&start_time, SLOT_DURATION_MINUTES)?;
        let display_time = format_display_time(&start_time, &end_time)?;

        Ok(Self {
            id: row.id,
            code: row.code.clone(),
            start_time,
            end_time,
            display_time,
        })
    }

    #[must_use]
    pub const fn id(&self) -> LookupId {
        self.id
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Start time as `HH:MM`.
    #[must_use]
    pub fn start_time(&self) -> &str {
        &self.start_time
    }

    /// End time as `HH:MM`.
    #[must_use]
    pub fn end_time(&self) -> &str {
        &self.end_time
    }

    /// Label such as `9h - 10h30`.
    #[must_use]
    pub fn display_time(&self) -> &str {
        &self.display_time
    }
}

/// Transforms every active row. Inactive rows are dropped.
pub fn transform_time_slots(rows: &[LookupRow]) -> Result<Vec<TimeSlot>, LookupError> {
    rows.iter()
        .filter(|row| row.is_active)
        .map(TimeSlot::from_row)
        .collect()
}

fn parse_time(value: &str) -> Result<(u32, u32), LookupError> {
    let trimmed = value.trim();
    let (hour, rest) = trimmed
        .split_once(':')
        .ok_or_else(|| LookupError::malformed_time(value))?;
    // Backend rows sometimes carry seconds ("09:00:00").
    let minute = rest.split(':').next().unwrap_or(rest);

    let hour: u32 = hour
        .parse()
        .map_err(|_| LookupError::malformed_time(value))?;
    let minute: u32 = minute
        .parse()
        .map_err(|_| LookupError::malformed_time(value))?;

    if hour > 23 || minute > 59 {
        return Err(LookupError::malformed_time(value));
    }

    Ok((hour, minute))
}

/// Normalizes `9:00`, `09:00` or `09:00:00` to `09:00`.
pub fn normalize_time(value: &str) -> Result<String, LookupError> {
    let (hour, minute) = parse_time(value)?;
    Ok(format!("{hour:02}:{minute:02}"))
}

pub fn add_minutes(time: &str, minutes: u32) -> Result<String, LookupError> {
    let (hour, minute) = parse_time(time)?;
    let total = (hour * 60 + minute + minutes) % MINUTES_PER_DAY;
    Ok(format!("{:02}:{:02}", total / 60, total % 60))
}

pub fn format_display_time(start: &str, end: &str) -> Result<String, LookupError> {
    Ok(format!(
        "{} - {}",
        display_endpoint(start)?,
        display_endpoint(end)?
    ))
}

fn display_endpoint(time: &str) -> Result<String, LookupError> {
    let (hour, minute) = parse_time(time)?;
    if minute == 0 {
        Ok(format!("{hour}h"))
    } else {
        Ok(format!("{hour}h{minute:02}"))
    }
}
