//! Plain-text rendering of a finished run: the event log, the per-client table, and the statistics block.
//!
//! Nothing here feeds back into the engine. Every function consumes the read-only outputs exposed by [`Simulation`].
//!
//! [`Simulation`]: crate::Simulation

use crate::stats::{EventRecord, Summary};
use crate::Client;

use std::fmt::{Display, Formatter};

/// A bordered text table with left-aligned, padded cells.
///
/// ```text
/// +-------+---------+
/// | event | time    |
/// +-------+---------+
/// | ...   | ...     |
/// +-------+---------+
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given column headers.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Cells beyond the header count are dropped; missing cells render empty.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Number of rows, not counting the header.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let widths = self.widths();
        let separator: String = widths.iter().fold(String::from("+"), |mut line, &w| {
            line.push_str(&"-".repeat(w + 2));
            line.push('+');
            line
        });

        writeln!(f, "{}", separator)?;
        write_row(f, &widths, &self.headers)?;
        writeln!(f, "{}", separator)?;
        for row in &self.rows {
            write_row(f, &widths, row)?;
        }
        writeln!(f, "{}", separator)
    }
}

fn write_row(f: &mut Formatter, widths: &[usize], cells: &[String]) -> std::fmt::Result {
    for (i, &width) in widths.iter().enumerate() {
        let cell = cells.get(i).map_or("", String::as_str);
        write!(f, "| {:<width$} ", cell, width = width)?;
    }
    writeln!(f, "|")
}

fn time(value: f64) -> String {
    format!("{:.5}", value)
}

/// One row per processed event: label, time, and clients in the system afterwards.
pub fn event_table(events: &[EventRecord]) -> Table {
    let mut table = Table::new(["Event", "Time", "In system"]);
    for event in events {
        table.push_row(vec![event.label(), time(event.time), event.queue_len.to_string()]);
    }
    table
}

/// One row per client, numbered from 1 in arrival order.
pub fn client_table(clients: &[Client]) -> Table {
    let mut table = Table::new([
        "#",
        "Arrival",
        "Service start",
        "Wait",
        "Service",
        "Departure",
        "In system",
    ]);
    for (i, client) in clients.iter().enumerate() {
        table.push_row(vec![
            (i + 1).to_string(),
            time(client.arrival_time()),
            time(client.service_start_time()),
            time(client.waiting_time()),
            time(client.service_time()),
            time(client.departure_time()),
            time(client.system_time()),
        ]);
    }
    table
}

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        writeln!(f, "--- STATISTICS ---")?;
        writeln!(f, "Clients arrived: {}", self.clients)?;
        writeln!(f, "Overrun past closing: {:.5}", self.tail_overrun)?;
        writeln!(f, "Mean waiting time: {:.5}", self.mean_wait)?;
        writeln!(f, "Mean queue length: {:.2}", self.mean_queue_len)?;
        writeln!(f, "Mean time in system: {:.5}", self.mean_system_time)?;
        writeln!(f, "Server idle time: {:.5}", self.idle_time)?;
        writeln!(f, "Server utilization: {:.5}", self.utilization)
    }
}
