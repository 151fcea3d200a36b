//! Command execution

use std::{io::Write, sync::Arc, time::Duration};

use anyhow::{Context, bail};
use application::{ApplicationError, BirthdayCalendarService, sort_events};
use chrono::TimeDelta;
use domain::{BirthdayEvent, Timezone};
use infrastructure::{AppConfig, CardDavAddressBookAdapter, ConfigValidator};
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::{
    cli::Commands,
    output::{render_events_text, render_json, render_next_text},
};

/// Log configuration warnings and refuse to run on critical ones
pub fn check_config(config: &AppConfig) -> anyhow::Result<()> {
    let warnings = ConfigValidator::validate(config);
    ConfigValidator::log_warnings(&warnings);

    if ConfigValidator::should_block_startup(&warnings) {
        let critical: Vec<String> = warnings
            .iter()
            .filter(|w| w.is_critical())
            .map(ToString::to_string)
            .collect();
        bail!("Invalid configuration:\n{}", critical.join("\n"));
    }
    Ok(())
}

/// Execute `command`, writing its output to `out`
pub async fn run<W: Write>(
    command: Commands,
    config: &AppConfig,
    out: &mut W,
) -> anyhow::Result<()> {
    let timezone = config.calendar.timezone()?;
    let adapter = CardDavAddressBookAdapter::new(config.carddav.to_carddav_config())?;
    let service = BirthdayCalendarService::new(Arc::new(adapter))
        .with_horizon_days(config.calendar.days)?;

    match command {
        Commands::Events { from, days, json } => {
            // Window days are interpreted in the calendar timezone
            let start = from.map_or_else(
                || timezone.now(),
                |from| from.with_timezone(&timezone.tz()),
            );
            let days = days.unwrap_or(config.calendar.days);
            let end = start
                .checked_add_signed(TimeDelta::days(i64::from(days)))
                .context("Window end is out of range")?;

            let mut events = service.get_events_in_window(&start, &end).await;
            sort_events(&mut events);

            let rendered = if json {
                render_json(&events)?
            } else {
                render_events_text(
                    &config.calendar.name,
                    start.date_naive(),
                    end.date_naive(),
                    &events,
                )
            };
            out.write_all(rendered.as_bytes())?;
        },

        Commands::Next { json } => {
            let next = service.refresh(&timezone.now()).await;
            let rendered = if json {
                render_json(&next)?
            } else {
                render_next_text(next.as_ref(), config.calendar.days)
            };
            out.write_all(rendered.as_bytes())?;
        },

        Commands::Watch { interval_secs } => {
            watch(
                &service,
                timezone,
                Duration::from_secs(interval_secs),
                config.calendar.days,
                out,
            )
            .await?;
        },

        Commands::Verify => match service.verify_connection().await {
            Ok(()) => writeln!(out, "ok: {} accepted the credentials", config.carddav.url)?,
            Err(ApplicationError::InvalidAuth) => {
                bail!("invalid authentication for {}", config.carddav.url)
            },
            Err(e) => {
                return Err(e).with_context(|| format!("cannot connect to {}", config.carddav.url));
            },
        },
    }

    out.flush()?;
    Ok(())
}

/// Refresh the next birthday every `period` until Ctrl-C
async fn watch<W: Write>(
    service: &BirthdayCalendarService,
    timezone: Timezone,
    period: Duration,
    horizon_days: u32,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut shown: Option<Option<BirthdayEvent>> = None;
    info!(period_secs = period.as_secs(), "Watching for birthday changes");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let next = service.refresh(&timezone.now()).await;
                if shown.as_ref() != Some(&next) {
                    out.write_all(render_next_text(next.as_ref(), horizon_days).as_bytes())?;
                    out.flush()?;
                    shown = Some(next);
                }
            }
            result = &mut shutdown => {
                result.context("Failed to listen for Ctrl-C")?;
                info!("Stopping watch");
                return Ok(());
            }
        }
    }
}
