//! Day script grammar and validation
//!
//! Parses the fixed-format script (header plus timestamped event lines) into
//! a [`Script`], or reports the 1-based number of the first line that fails
//! validation. Acceptance is all-or-nothing: the simulator only ever sees a
//! fully validated event list.
//!
//! Line counting: the three header lines count as 1..3 whether present,
//! blank or malformed; in the event
//! section, exactly-empty lines are silently skipped and do not advance the
//! counter, while every other line is validated strictly.

use crate::types::{ClientName, Event, EventKind, Minute, Result, Script, ScriptError};

/// Upper bound on the table count (header line 1)
pub const MAX_TABLES: u32 = 1000;

/// Upper bound on the hourly price (header line 3)
pub const MAX_PRICE: u64 = 1_000_000_000;

/// Parse and validate a whole day script
///
/// # Arguments
/// * `input` - the raw script text, line-oriented
///
/// # Returns
/// * `Ok(Script)` if every line validates
/// * `Err(ScriptError::Rejected { line })` at the first offending line
///
/// # Example
/// ```
/// use hall_sim_core::parse_script;
///
/// let script = parse_script("3\n08:00 20:00\n150\n08:05 1 ann\n").unwrap();
/// assert_eq!(script.tables, 3);
/// assert_eq!(script.events.len(), 1);
///
/// // Table count out of range: rejected at line 1
/// let err = parse_script("0\n08:00 20:00\n150\n").unwrap_err();
/// assert_eq!(err.line(), 1);
/// ```
pub fn parse_script(input: &str) -> Result<Script> {
    let mut lines = input.lines();
    let mut line_no: u32 = 0;

    // Header line 1: table count
    line_no += 1;
    let tables = lines
        .next()
        .and_then(|l| parse_bounded_int(l, u64::from(MAX_TABLES)))
        .ok_or(ScriptError::Rejected { line: line_no })? as u32;

    // Header line 2: opening and closing times
    line_no += 1;
    let (open, close) = lines
        .next()
        .and_then(parse_hours_line)
        .ok_or(ScriptError::Rejected { line: line_no })?;

    // Header line 3: price per started hour
    line_no += 1;
    let price = lines
        .next()
        .and_then(|l| parse_bounded_int(l, MAX_PRICE))
        .ok_or(ScriptError::Rejected { line: line_no })?;

    log::debug!(
        "header accepted: {} tables, open {} close {}, price {}",
        tables,
        open,
        close,
        price
    );

    // Event section: empty lines are skipped without counting
    let mut events = Vec::new();
    let mut prev_time = Minute::MIDNIGHT;
    for raw in lines {
        if raw.is_empty() {
            continue;
        }
        line_no += 1;
        let event = parse_event_line(raw, line_no, tables, prev_time)
            .ok_or(ScriptError::Rejected { line: line_no })?;
        prev_time = event.time;
        events.push(event);
    }

    log::debug!("script accepted: {} events", events.len());
    Ok(Script {
        tables,
        open,
        close,
        price,
        events,
    })
}

/// Parse a line holding a single positive integer with an upper bound
///
/// The whole line must be ASCII digits; leading zeros are tolerated, signs
/// and surrounding whitespace are not. Values that overflow `u64` fail the
/// parse and reject the line, same as exceeding the bound.
fn parse_bounded_int(line: &str, max: u64) -> Option<u64> {
    if line.is_empty() || !line.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = line.parse::<u64>().ok()?;
    (value >= 1 && value <= max).then_some(value)
}

/// Parse the `"<open> <close>"` header line; open must be strictly earlier
fn parse_hours_line(line: &str) -> Option<(Minute, Minute)> {
    let mut tokens = line.split_ascii_whitespace();
    let open = Minute::parse(tokens.next()?)?;
    let close = Minute::parse(tokens.next()?)?;
    if tokens.next().is_some() || open >= close {
        return None;
    }
    Some((open, close))
}

/// Parse and validate a single event line
///
/// Grammar: `HH:MM <id> <args...>`, split on ASCII whitespace, no trailing
/// tokens. Timestamps must be non-decreasing across the event section.
fn parse_event_line(raw: &str, line_no: u32, tables: u32, prev_time: Minute) -> Option<Event> {
    let tokens: Vec<&str> = raw.split_ascii_whitespace().collect();
    if tokens.len() < 2 {
        return None;
    }

    let time = Minute::parse(tokens[0])?;
    if time < prev_time {
        log::warn!("line {}: timestamp {} runs backwards", line_no, time);
        return None;
    }

    // Stream-style integer parse: an explicit sign is accepted, then the
    // value is matched against the known event ids.
    let id = tokens[1].parse::<i64>().ok()?;
    let kind = match id {
        1 | 3 | 4 => {
            if tokens.len() != 3 {
                return None;
            }
            let client = ClientName::parse(tokens[2])?;
            match id {
                1 => EventKind::Arrive { client },
                3 => EventKind::Wait { client },
                _ => EventKind::Leave { client },
            }
        }
        2 => {
            if tokens.len() != 4 {
                return None;
            }
            let client = ClientName::parse(tokens[2])?;
            let table = tokens[3].parse::<i64>().ok()?;
            if table < 1 || table > i64::from(tables) {
                return None;
            }
            EventKind::Sit {
                client,
                table: table as u32,
            }
        }
        _ => return None,
    };

    Some(Event {
        time,
        kind,
        raw: raw.to_string(),
        line: line_no,
    })
}
