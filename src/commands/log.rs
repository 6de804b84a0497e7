//! Implementation of the `edict log` command.

use super::RunContext;
use crate::cli::LogArgs;
use edict::error::{EdictError, Result};
use edict::events::{Event, read_events};

/// Execute the `edict log` command.
pub fn cmd_log(ctx: &RunContext, args: LogArgs) -> Result<()> {
    let Some(log) = &ctx.config.events_log else {
        return Err(EdictError::UserError(
            "no audit log configured (set `events_log` in edict.yaml)".to_string(),
        ));
    };

    let path = ctx.path(log);
    if !path.exists() {
        println!("No events recorded.");
        return Ok(());
    }

    let events = select_events(read_events(&path)?, &args);
    if events.is_empty() {
        println!("No matching events.");
        return Ok(());
    }

    for event in &events {
        println!("{}", format_event(event));
    }
    Ok(())
}

/// Apply the command filter, then keep the newest `limit` events.
pub(crate) fn select_events(events: Vec<Event>, args: &LogArgs) -> Vec<Event> {
    let mut events: Vec<Event> = events
        .into_iter()
        .filter(|e| match &args.command {
            Some(name) => e.command.as_deref() == Some(name.as_str()),
            None => true,
        })
        .collect();

    if let Some(limit) = args.limit
        && events.len() > limit
    {
        let skip = events.len() - limit;
        events.drain(..skip);
    }
    events
}

pub(crate) fn format_event(event: &Event) -> String {
    format!(
        "{}  {:<7}  {:<20}  {}  {}",
        event.ts.format("%Y-%m-%d %H:%M:%S"),
        event.action.to_string(),
        event.command.as_deref().unwrap_or("-"),
        event.actor,
        event.details
    )
}
