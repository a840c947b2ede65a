//! Transcript model and output formatting
//!
//! The simulator emits a [`Transcript`]: the ordered transcript lines
//! (opening time, echoed events, synthesized notifications, closing time)
//! plus the per-table report. `Display` impls produce the exact wire
//! grammar; [`Transcript::render`] assembles the canonical text output.

use crate::types::{ClientName, Denial, Minute};
use serde::Serialize;
use std::fmt;

/// One line of the day transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TranscriptLine {
    /// Opening time, first line of every accepted run
    Open { time: Minute },
    /// A script event echoed verbatim
    Echo { raw: String },
    /// `HH:MM 11 <name>` - forced departure (full queue or end of day)
    ForcedLeave { time: Minute, client: ClientName },
    /// `HH:MM 12 <name> <table>` - queue head seated at a freed table
    AutoSeat {
        time: Minute,
        client: ClientName,
        table: u32,
    },
    /// `HH:MM 13 <word>` - event denied by a business rule
    Denied { time: Minute, denial: Denial },
    /// Closing time, after the end-of-day sweep
    Close { time: Minute },
}

impl fmt::Display for TranscriptLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptLine::Open { time } | TranscriptLine::Close { time } => {
                write!(f, "{}", time)
            }
            TranscriptLine::Echo { raw } => f.write_str(raw),
            TranscriptLine::ForcedLeave { time, client } => {
                write!(f, "{} 11 {}", time, client)
            }
            TranscriptLine::AutoSeat {
                time,
                client,
                table,
            } => write!(f, "{} 12 {} {}", time, client, table),
            TranscriptLine::Denied { time, denial } => write!(f, "{} 13 {}", time, denial),
        }
    }
}

/// Final report row for one table: number, revenue, total busy time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReport {
    /// Table number, 1-based
    pub table: u32,
    /// Accumulated revenue in whole price units
    pub revenue: u64,
    /// Total occupied minutes over the day
    pub busy_minutes: u64,
}

impl fmt::Display for TableReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.table,
            self.revenue,
            format_duration(self.busy_minutes)
        )
    }
}

/// Render a minute total as `HH:MM`
///
/// Unlike [`Minute`], this is a duration: the hour field may exceed 23 and
/// grows past two digits as needed, zero-padded to at least two.
pub fn format_duration(minutes: u64) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// The complete output of a simulated day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transcript {
    /// Transcript lines in emission order, opening through closing
    pub lines: Vec<TranscriptLine>,
    /// One row per table, in table-number order
    pub report: Vec<TableReport>,
}

impl Transcript {
    /// Render the canonical text output: every transcript line, then the
    /// table report, each line `\n`-terminated
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.to_string());
            out.push('\n');
        }
        for row in &self.report {
            out.push_str(&row.to_string());
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Minute {
        Minute::parse(s).unwrap()
    }

    fn name(s: &str) -> ClientName {
        ClientName::parse(s).unwrap()
    }

    #[test]
    fn test_line_rendering() {
        assert_eq!(TranscriptLine::Open { time: t("09:00") }.to_string(), "09:00");
        assert_eq!(
            TranscriptLine::ForcedLeave {
                time: t("13:05"),
                client: name("ann")
            }
            .to_string(),
            "13:05 11 ann"
        );
        assert_eq!(
            TranscriptLine::AutoSeat {
                time: t("13:05"),
                client: name("bob"),
                table: 4
            }
            .to_string(),
            "13:05 12 bob 4"
        );
        assert_eq!(
            TranscriptLine::Denied {
                time: t("13:05"),
                denial: Denial::PlaceIsBusy
            }
            .to_string(),
            "13:05 13 PlaceIsBusy"
        );
        assert_eq!(
            TranscriptLine::Echo {
                raw: "13:05 1 ann".to_string()
            }
            .to_string(),
            "13:05 1 ann"
        );
    }

    #[test]
    fn test_duration_can_exceed_a_day() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(40), "00:40");
        assert_eq!(format_duration(25 * 60 + 5), "25:05");
        assert_eq!(format_duration(100 * 60), "100:00");
    }

    #[test]
    fn test_report_row() {
        let row = TableReport {
            table: 2,
            revenue: 450,
            busy_minutes: 130,
        };
        assert_eq!(row.to_string(), "2 450 02:10");
    }

    #[test]
    fn test_render_terminates_every_line() {
        let transcript = Transcript {
            lines: vec![
                TranscriptLine::Open { time: t("09:00") },
                TranscriptLine::Close { time: t("19:00") },
            ],
            report: vec![TableReport {
                table: 1,
                revenue: 0,
                busy_minutes: 0,
            }],
        };
        assert_eq!(transcript.render(), "09:00\n19:00\n1 0 00:00\n");
    }
}
