//! The day simulator
//!
//! Replays a validated [`Script`] over the establishment state - tables,
//! present clients, waiting queue - and produces the full [`Transcript`].
//! Every event is echoed verbatim, then its handler either mutates state or
//! appends a `13 <word>` denial; auto-seating, full-queue ejection and the
//! end-of-day sweep append synthesized `12`/`11` lines.
//!
//! Client membership is an index from name to lifecycle state, so presence
//! and queue checks are constant-time; the `VecDeque` alongside it carries
//! only the FIFO order. A name is indexed at most once and queued at most
//! once.

use crate::transcript::{TableReport, Transcript, TranscriptLine};
use crate::types::{ClientName, Denial, EventKind, Minute, Script};
use std::collections::{HashMap, VecDeque};

/// Where a present client currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    /// In the building, not seated, not queued
    Idle,
    /// In the waiting queue
    Queued,
    /// At a table since the given time
    Seated { table: u32, since: Minute },
}

/// Per-table running state
#[derive(Debug, Clone, Default)]
struct TableState {
    occupant: Option<ClientName>,
    busy_minutes: u64,
    revenue: u64,
}

/// Simulate a whole day and return its transcript
///
/// The script is assumed validated; [`parse_script`](crate::parse_script)
/// guarantees every invariant the handlers rely on. Scripts built by hand
/// are still handled defensively: a `Sit` naming a table outside `[1, N]`
/// is denied with `PlaceIsBusy` rather than panicking.
///
/// # Example
/// ```
/// use hall_sim_core::{parse_script, simulate};
///
/// let script = parse_script("1\n08:00 09:00\n100\n08:10 1 ann\n08:15 2 ann 1\n08:50 4 ann\n").unwrap();
/// let transcript = simulate(&script);
/// assert_eq!(transcript.report[0].revenue, 100); // 35 min billed as one hour
/// ```
pub fn simulate(script: &Script) -> Transcript {
    Floor::new(script).run(script)
}

/// The establishment state machine
struct Floor {
    tables: Vec<TableState>,
    clients: HashMap<ClientName, Presence>,
    queue: VecDeque<ClientName>,
    clock: Minute,
    open: Minute,
    close: Minute,
    price: u64,
    lines: Vec<TranscriptLine>,
}

impl Floor {
    fn new(script: &Script) -> Self {
        Floor {
            tables: vec![TableState::default(); script.tables as usize],
            clients: HashMap::new(),
            queue: VecDeque::new(),
            clock: script.open,
            open: script.open,
            close: script.close,
            price: script.price,
            lines: Vec::new(),
        }
    }

    fn run(mut self, script: &Script) -> Transcript {
        self.lines.push(TranscriptLine::Open { time: self.open });

        for event in &script.events {
            self.clock = event.time;
            self.lines.push(TranscriptLine::Echo {
                raw: event.raw.clone(),
            });
            match &event.kind {
                EventKind::Arrive { client } => self.handle_arrive(client),
                EventKind::Sit { client, table } => self.handle_sit(client, *table),
                EventKind::Wait { client } => self.handle_wait(client),
                EventKind::Leave { client } => self.handle_leave(client),
            }
        }

        self.close_day();

        let report = self
            .tables
            .iter()
            .enumerate()
            .map(|(i, t)| TableReport {
                table: i as u32 + 1,
                revenue: t.revenue,
                busy_minutes: t.busy_minutes,
            })
            .collect();

        Transcript {
            lines: self.lines,
            report,
        }
    }

    fn deny(&mut self, denial: Denial) {
        log::debug!("{} denied: {}", self.clock, denial);
        self.lines.push(TranscriptLine::Denied {
            time: self.clock,
            denial,
        });
    }

    /// Accrue revenue and busy time for a stay ending now
    ///
    /// Partial hours bill as full hours; a zero-minute stay bills nothing.
    fn settle(&mut self, table: u32, since: Minute, end: Minute) {
        let minutes = u64::from(end.minutes_since(since));
        let billed_hours = minutes.div_ceil(60);
        let state = &mut self.tables[table as usize - 1];
        state.busy_minutes += minutes;
        state.revenue += billed_hours * self.price;
        state.occupant = None;
        log::trace!(
            "table {} settled: {} min, {} hours billed",
            table,
            minutes,
            billed_hours
        );
    }

    /// Put a client at a table starting now
    fn seat(&mut self, client: &ClientName, table: u32) {
        self.tables[table as usize - 1].occupant = Some(client.clone());
        self.clients.insert(
            client.clone(),
            Presence::Seated {
                table,
                since: self.clock,
            },
        );
    }

    fn handle_arrive(&mut self, client: &ClientName) {
        if self.clients.contains_key(client) {
            self.deny(Denial::YouShallNotPass);
            return;
        }
        if self.clock < self.open || self.clock >= self.close {
            self.deny(Denial::NotOpenYet);
            return;
        }
        log::debug!("{} arrived: {}", self.clock, client);
        self.clients.insert(client.clone(), Presence::Idle);
    }

    fn handle_sit(&mut self, client: &ClientName, table: u32) {
        let Some(presence) = self.clients.get(client).copied() else {
            self.deny(Denial::ClientUnknown);
            return;
        };
        // Scripts from the validator never carry an out-of-range table, but
        // a hand-built one can; answer as if the place were taken.
        if table < 1 || table > self.tables.len() as u32 {
            self.deny(Denial::PlaceIsBusy);
            return;
        }
        let occupant = &self.tables[table as usize - 1].occupant;
        if occupant.as_ref().is_some_and(|o| o != client) {
            self.deny(Denial::PlaceIsBusy);
            return;
        }
        if matches!(presence, Presence::Seated { table: cur, .. } if cur == table) {
            self.deny(Denial::PlaceIsBusy);
            return;
        }

        match presence {
            Presence::Seated { table: old, since } => {
                // Transfer: the old table bills up to now before it frees
                self.settle(old, since, self.clock);
            }
            Presence::Queued => {
                self.queue.retain(|n| n != client);
            }
            Presence::Idle => {}
        }
        log::debug!("{} seated {} at table {}", self.clock, client, table);
        self.seat(client, table);
    }

    fn handle_wait(&mut self, client: &ClientName) {
        if self.tables.iter().any(|t| t.occupant.is_none()) {
            self.deny(Denial::ICanWaitNoLonger);
            return;
        }
        match self.clients.get(client) {
            Some(Presence::Queued) | Some(Presence::Seated { .. }) => {
                // Already queued or seated; the queue holds a name at most once
                log::debug!("{} ignored wait from {}", self.clock, client);
                return;
            }
            _ => {}
        }
        if self.queue.len() >= self.tables.len() {
            // Queue at capacity: the client is ejected outright, with a bare
            // forced-leave line and no error word
            log::debug!("{} queue full, ejecting {}", self.clock, client);
            self.clients.remove(client);
            self.lines.push(TranscriptLine::ForcedLeave {
                time: self.clock,
                client: client.clone(),
            });
            return;
        }
        log::debug!("{} queued {}", self.clock, client);
        self.clients.insert(client.clone(), Presence::Queued);
        self.queue.push_back(client.clone());
    }

    fn handle_leave(&mut self, client: &ClientName) {
        let Some(presence) = self.clients.remove(client) else {
            self.deny(Denial::ClientUnknown);
            return;
        };
        log::debug!("{} left: {}", self.clock, client);
        let freed = match presence {
            Presence::Seated { table, since } => {
                self.settle(table, since, self.clock);
                Some(table)
            }
            Presence::Queued => {
                self.queue.retain(|n| n != client);
                None
            }
            Presence::Idle => None,
        };

        if let Some(table) = freed {
            if let Some(next) = self.queue.pop_front() {
                log::debug!("{} auto-seated {} at table {}", self.clock, next, table);
                self.seat(&next, table);
                self.lines.push(TranscriptLine::AutoSeat {
                    time: self.clock,
                    client: next,
                    table,
                });
            }
        }
    }

    /// End-of-day sweep: settle and eject every remaining client, in
    /// lexicographic name order, then emit the closing time
    fn close_day(&mut self) {
        self.clock = self.close;

        let mut names: Vec<ClientName> = self.clients.keys().cloned().collect();
        names.sort();
        for name in names {
            if let Some(Presence::Seated { table, since }) = self.clients.remove(&name) {
                self.settle(table, since, self.close);
            }
            self.lines.push(TranscriptLine::ForcedLeave {
                time: self.close,
                client: name,
            });
        }
        self.queue.clear();

        self.lines.push(TranscriptLine::Close { time: self.close });
    }
}
