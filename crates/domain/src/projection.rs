//! Birthday projection
//!
//! Places a contact's birthday onto a half-open query window `[start, end)`.
//! Only the window start's year and the following year are considered, so a
//! contact yields at most one event per window.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, TimeZone};

use crate::entities::{BirthdayEvent, ContactRecord};

/// Longest DST gap we step over when local midnight does not exist
const MAX_GAP_MINUTES: i64 = 24 * 60;
const GAP_STEP_MINUTES: i64 = 15;

/// Project a contact's birthday onto the window `[window_start, window_end)`
///
/// Candidate days are interpreted in `window_start`'s timezone: a candidate
/// matches when its local day overlaps the window. The candidate in the
/// window start's year wins over the one in the following year.
///
/// Returns `None` when the contact has no usable birthday or neither
/// candidate overlaps the window.
pub fn project<Tz: TimeZone>(
    record: &ContactRecord,
    window_start: &DateTime<Tz>,
    window_end: &DateTime<Tz>,
) -> Option<BirthdayEvent> {
    let birth_date = record.birth_date?;
    let zone = window_start.timezone();
    let year = window_start.year();

    let matched = [Some(year), year.checked_add(1)]
        .into_iter()
        .flatten()
        .filter_map(|candidate_year| birth_date.in_year(candidate_year))
        .find(|candidate| overlaps_window(&zone, *candidate, window_start, window_end))?;

    let age = birth_date
        .known_year()
        .and_then(|born| matched.year().checked_sub(born))
        .and_then(|age| u32::try_from(age).ok());

    BirthdayEvent::on_date(&record.resolved_name(), matched, age)
}

/// Project every record, keeping only those with an event in the window
pub fn project_all<'a, Tz, I>(
    records: I,
    window_start: &DateTime<Tz>,
    window_end: &DateTime<Tz>,
) -> Vec<BirthdayEvent>
where
    Tz: TimeZone,
    I: IntoIterator<Item = &'a ContactRecord>,
{
    records
        .into_iter()
        .filter_map(|record| project(record, window_start, window_end))
        .collect()
}

fn overlaps_window<Tz: TimeZone>(
    zone: &Tz,
    day: NaiveDate,
    window_start: &DateTime<Tz>,
    window_end: &DateTime<Tz>,
) -> bool {
    let Some(day_start) = local_midnight(zone, day) else {
        return false;
    };
    let Some(day_end) = day.succ_opt().and_then(|next| local_midnight(zone, next)) else {
        return false;
    };
    day_end > *window_start && day_start < *window_end
}

/// First instant of `day` in `zone`
///
/// Ambiguous midnights resolve to the earlier instant; a midnight skipped by
/// a DST transition resolves to the first valid local time after the gap.
fn local_midnight<Tz: TimeZone>(zone: &Tz, day: NaiveDate) -> Option<DateTime<Tz>> {
    let midnight = day.and_time(NaiveTime::MIN);
    if let Some(instant) = zone.from_local_datetime(&midnight).earliest() {
        return Some(instant);
    }
    (1..=MAX_GAP_MINUTES / GAP_STEP_MINUTES).find_map(|step| {
        let shifted = midnight.checked_add_signed(TimeDelta::minutes(step * GAP_STEP_MINUTES))?;
        zone.from_local_datetime(&shifted).earliest()
    })
}
