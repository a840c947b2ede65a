//! Hall Simulation Library
//!
//! A deterministic simulator for one day of a table-service establishment,
//! driven by a fixed-format day script: a header (table count, opening
//! hours, hourly price) followed by timestamped client events (arrival,
//! seating, queueing, departure).
//!
//! # Architecture
//!
//! The library runs two sharply separated passes:
//! - [`parse_script`] validates the script line by line and either returns
//!   the fully materialized event list or the 1-based number of the first
//!   offending line. Acceptance is all-or-nothing.
//! - [`simulate`] replays the validated events over tables, clients and the
//!   waiting queue, echoing each event, injecting synthesized lines
//!   (auto-seat, forced leave, denial) and producing the per-table report.
//!
//! The library does NOT:
//! - Read scripts from disk or write transcripts anywhere
//! - Parse command-line arguments or choose exit codes
//!
//! All of that lives in the application layer (hall-sim-cli).
//!
//! # Example Usage
//!
//! ```
//! use hall_sim_core::{parse_script, simulate, ScriptError};
//!
//! let input = "1\n08:00 09:00\n100\n08:10 1 ann\n08:15 2 ann 1\n08:50 4 ann\n";
//! match parse_script(input) {
//!     Ok(script) => {
//!         let transcript = simulate(&script);
//!         // 35 occupied minutes (08:15 to 08:50) bill as one full hour
//!         assert_eq!(transcript.report[0].revenue, 100);
//!         assert!(transcript.render().starts_with("08:00\n"));
//!     }
//!     Err(ScriptError::Rejected { line }) => println!("{}", line),
//! }
//! ```

// Public modules
pub mod script;
pub mod sim;
pub mod transcript;
pub mod types;

// Re-export main types for convenience
pub use script::{parse_script, MAX_PRICE, MAX_TABLES};
pub use sim::simulate;
pub use transcript::{format_duration, TableReport, Transcript, TranscriptLine};
pub use types::{ClientName, Denial, Event, EventKind, Minute, Result, Script, ScriptError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: an empty day renders open, close and one report row
        let script = parse_script("1\n10:00 18:00\n25\n").unwrap();
        let transcript = simulate(&script);
        assert_eq!(transcript.render(), "10:00\n18:00\n1 0 00:00\n");
    }
}
