//! Birthday calendar service
//!
//! Fetches contacts through the [`AddressBookPort`], projects their
//! birthdays onto a query window and keeps track of the next upcoming
//! birthday for periodic refreshes.

use std::{cmp::Ordering, fmt, sync::Arc};

use chrono::{DateTime, TimeDelta, TimeZone};
use domain::{BirthdayEvent, project_all};
use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{AddressBookError, AddressBookPort},
};

/// Default length of the window used for the next event
pub const DEFAULT_HORIZON_DAYS: u32 = 30;

/// Service turning address book contacts into birthday events
pub struct BirthdayCalendarService {
    address_book: Arc<dyn AddressBookPort>,
    horizon: TimeDelta,
    current: RwLock<Option<BirthdayEvent>>,
}

impl fmt::Debug for BirthdayCalendarService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BirthdayCalendarService")
            .field("horizon", &self.horizon)
            .finish_non_exhaustive()
    }
}

impl BirthdayCalendarService {
    /// Create a new service with the default 30-day horizon
    pub fn new(address_book: Arc<dyn AddressBookPort>) -> Self {
        Self {
            address_book,
            horizon: TimeDelta::days(i64::from(DEFAULT_HORIZON_DAYS)),
            current: RwLock::new(None),
        }
    }

    /// Use a horizon of `days` days for [`Self::refresh`]
    pub fn with_horizon_days(mut self, days: u32) -> Result<Self, ApplicationError> {
        if days == 0 {
            return Err(ApplicationError::Configuration(
                "horizon must be at least one day".to_string(),
            ));
        }
        self.horizon = TimeDelta::days(i64::from(days));
        Ok(self)
    }

    /// Length of the window used for the next event
    pub const fn horizon(&self) -> TimeDelta {
        self.horizon
    }

    /// All birthday events overlapping `[start, end)`
    ///
    /// Address book failures are logged and produce an empty list.
    #[instrument(skip_all, fields(start = %start.naive_utc(), end = %end.naive_utc()))]
    pub async fn get_events_in_window<Tz: TimeZone>(
        &self,
        start: &DateTime<Tz>,
        end: &DateTime<Tz>,
    ) -> Vec<BirthdayEvent> {
        let records = match self.address_book.fetch_records().await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Failed to fetch contacts, returning no events");
                return Vec::new();
            },
        };

        let events = project_all(&records, start, end);
        debug!(
            contacts = records.len(),
            events = events.len(),
            "Projected birthdays onto window"
        );
        events
    }

    /// Earliest birthday event overlapping `[start, end)`
    #[instrument(skip_all)]
    pub async fn get_next_event<Tz: TimeZone>(
        &self,
        start: &DateTime<Tz>,
        end: &DateTime<Tz>,
    ) -> Option<BirthdayEvent> {
        select_next_event(self.get_events_in_window(start, end).await)
    }

    /// Recompute the next event within the horizon starting at `now`
    ///
    /// The result replaces the cached event returned by
    /// [`Self::current_event`].
    #[instrument(skip_all, fields(now = %now.naive_utc()))]
    pub async fn refresh<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<BirthdayEvent> {
        let next = match now.clone().checked_add_signed(self.horizon) {
            Some(end) => self.get_next_event(now, &end).await,
            None => {
                warn!("Horizon end is out of range");
                None
            },
        };

        let previous = std::mem::replace(&mut *self.current.write(), next.clone());
        if previous != next {
            match &next {
                Some(event) => {
                    info!(summary = %event.summary, start = %event.start, "Next birthday changed");
                },
                None => info!("No birthday within horizon"),
            }
        }

        next
    }

    /// The event stored by the last [`Self::refresh`]
    pub fn current_event(&self) -> Option<BirthdayEvent> {
        self.current.read().clone()
    }

    /// Probe the address book with the configured credentials
    #[instrument(skip(self))]
    pub async fn verify_connection(&self) -> Result<(), ApplicationError> {
        self.address_book
            .check_connection()
            .await
            .map_err(map_error)
    }
}

/// Sort events for display: by start day, then summary
///
/// The sort is stable, so events on the same day with the same summary keep
/// their original order.
pub fn sort_events(events: &mut [BirthdayEvent]) {
    events.sort_by(compare_events);
}

/// The first event in display order
pub fn select_next_event(events: impl IntoIterator<Item = BirthdayEvent>) -> Option<BirthdayEvent> {
    events.into_iter().min_by(compare_events)
}

fn compare_events(a: &BirthdayEvent, b: &BirthdayEvent) -> Ordering {
    a.start
        .cmp(&b.start)
        .then_with(|| a.summary.cmp(&b.summary))
}

fn map_error(err: AddressBookError) -> ApplicationError {
    match err {
        AddressBookError::AuthenticationFailed => ApplicationError::InvalidAuth,
        AddressBookError::ServiceUnavailable(msg) | AddressBookError::OperationFailed(msg) => {
            ApplicationError::CannotConnect(msg)
        },
    }
}
