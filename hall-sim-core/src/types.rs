//! Core types for the hall simulation library
//!
//! This module defines the fundamental types shared by the script validator
//! and the simulator: minute-of-day timestamps, validated client names, the
//! event variants of the day script, and the library error type.

use serde::Serialize;
use std::fmt;

/// Result type for script operations
pub type Result<T> = std::result::Result<T, ScriptError>;

/// Errors produced while validating a day script
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    /// The script failed grammar validation. `line` is the 1-based number of
    /// the first offending line, counted the way the transcript reports it:
    /// header lines always count, empty lines between events do not.
    #[error("script rejected at line {line}")]
    Rejected { line: u32 },
}

impl ScriptError {
    /// The 1-based line number to report for this rejection
    pub fn line(&self) -> u32 {
        match self {
            ScriptError::Rejected { line } => *line,
        }
    }
}

/// A minute of the day in `[0, 1439]`, parsed from strict `HH:MM`
///
/// The grammar is fixed-width: exactly two digits, a colon, two digits.
/// `8:00`, `08:0` and `24:00` are all invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Minute(u32);

impl Minute {
    /// Number of minutes in a day; all `Minute` values are below this
    pub const PER_DAY: u32 = 24 * 60;

    /// Start of the day, `00:00`
    pub const MIDNIGHT: Minute = Minute(0);

    /// Parse a strict `HH:MM` token into a minute of the day
    pub fn parse(s: &str) -> Option<Minute> {
        let b = s.as_bytes();
        if b.len() != 5 || b[2] != b':' {
            return None;
        }
        if !(b[0].is_ascii_digit()
            && b[1].is_ascii_digit()
            && b[3].is_ascii_digit()
            && b[4].is_ascii_digit())
        {
            return None;
        }
        let hh = u32::from(b[0] - b'0') * 10 + u32::from(b[1] - b'0');
        let mm = u32::from(b[3] - b'0') * 10 + u32::from(b[4] - b'0');
        if hh > 23 || mm > 59 {
            return None;
        }
        Some(Minute(hh * 60 + mm))
    }

    /// Construct from a raw minute count, `None` if out of range
    pub fn from_minutes(m: u32) -> Option<Minute> {
        (m < Self::PER_DAY).then_some(Minute(m))
    }

    /// The raw minute-of-day value
    pub fn minutes(&self) -> u32 {
        self.0
    }

    /// Minutes elapsed from `earlier` to `self`
    ///
    /// The simulation clock never runs backwards, so `earlier <= self` holds
    /// at every call site; saturate rather than wrap if it does not.
    pub fn minutes_since(&self, earlier: Minute) -> u32 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Minute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// A validated client name: non-empty, `[a-z0-9_-]` only
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ClientName(String);

impl ClientName {
    /// Parse a name token, `None` if it violates the charset
    pub fn parse(s: &str) -> Option<ClientName> {
        if s.is_empty() {
            return None;
        }
        let valid = s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-');
        valid.then(|| ClientName(s.to_string()))
    }

    /// The name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload of a single script event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EventKind {
    /// A client walks in (event id 1)
    Arrive { client: ClientName },
    /// A client takes a specific table (event id 2)
    Sit { client: ClientName, table: u32 },
    /// A client joins the waiting queue (event id 3)
    Wait { client: ClientName },
    /// A client leaves the establishment (event id 4)
    Leave { client: ClientName },
}

impl EventKind {
    /// The client the event is about
    pub fn client(&self) -> &ClientName {
        match self {
            EventKind::Arrive { client }
            | EventKind::Sit { client, .. }
            | EventKind::Wait { client }
            | EventKind::Leave { client } => client,
        }
    }
}

/// A validated script event
///
/// Carries the verbatim source line so the transcript can echo it exactly,
/// and the 1-based line number it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// Timestamp; non-decreasing across the event list
    pub time: Minute,
    /// Event payload
    pub kind: EventKind,
    /// The source line, verbatim
    pub raw: String,
    /// 1-based script line number (header lines included in the count)
    pub line: u32,
}

/// A fully validated day script: header values plus the ordered event list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Script {
    /// Number of tables, in `[1, 1000]`
    pub tables: u32,
    /// Opening time
    pub open: Minute,
    /// Closing time; strictly after `open`
    pub close: Minute,
    /// Price per started hour, in `[1, 1_000_000_000]`
    pub price: u64,
    /// Events in timestamp order
    pub events: Vec<Event>,
}

/// Business-rule denial codes emitted as `HH:MM 13 <word>` lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Denial {
    /// Client is already present (or queued) under this name
    YouShallNotPass,
    /// Arrival outside opening hours
    NotOpenYet,
    /// Event names a client that is not present
    ClientUnknown,
    /// Target table is taken, out of range, or already theirs
    PlaceIsBusy,
    /// Waiting is not allowed while a table is free
    ICanWaitNoLonger,
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denial::YouShallNotPass => write!(f, "YouShallNotPass"),
            Denial::NotOpenYet => write!(f, "NotOpenYet"),
            Denial::ClientUnknown => write!(f, "ClientUnknown"),
            Denial::PlaceIsBusy => write!(f, "PlaceIsBusy"),
            Denial::ICanWaitNoLonger => write!(f, "ICanWaitNoLonger!"),
        }
    }
}
