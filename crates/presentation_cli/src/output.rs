//! Rendering of birthday events for the terminal

use chrono::NaiveDate;
use domain::BirthdayEvent;

/// One line per event: `YYYY-MM-DD  summary`
pub fn format_event(event: &BirthdayEvent) -> String {
    format!("{}  {}", event.start, event.summary)
}

/// Text listing of `events` under a header naming the calendar and window
pub fn render_events_text(
    calendar: &str,
    from: NaiveDate,
    until: NaiveDate,
    events: &[BirthdayEvent],
) -> String {
    let mut out = format!("{calendar}: {} from {from} until {until}\n", count(events.len()));
    for event in events {
        out.push_str(&format_event(event));
        out.push('\n');
    }
    out
}

/// Text for the next event, or a notice when there is none
pub fn render_next_text(event: Option<&BirthdayEvent>, horizon_days: u32) -> String {
    match event {
        Some(event) => format!("{}\n{}\n", format_event(event), event.description),
        None => format!("No birthdays in the next {horizon_days} days\n"),
    }
}

/// Pretty-printed JSON of any serializable value
pub fn render_json<T: serde::Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value).map(|mut json| {
        json.push('\n');
        json
    })
}

fn count(n: usize) -> String {
    match n {
        1 => "1 birthday".to_string(),
        n => format!("{n} birthdays"),
    }
}
