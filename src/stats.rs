use crate::engine::{EngineState, EventKind};
use crate::{Client, Window};

/// One line of the event log: what happened, to which client, when, and how many clients were in the system after.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventRecord {
    pub kind: EventKind,
    /// 1-based sequence number: the arrival count for arrivals, the departure count for departures.
    pub client: usize,
    pub time: f64,
    pub queue_len: usize,
}

impl EventRecord {
    /// Human-readable description, e.g. `client 3 arrived`.
    pub fn label(&self) -> String {
        match self.kind {
            EventKind::Arrival => format!("client {} arrived", self.client),
            EventKind::Departure => format!("client {} departed", self.client),
            EventKind::PostCloseDeparture => format!("client {} departed after close", self.client),
            EventKind::Terminate => "simulation terminated".into(),
        }
    }
}

/// Accumulates the per-event queue-size samples and the event log as the engine processes events.
#[derive(Debug, Clone, Default)]
pub struct StatisticsCollector {
    queue_sizes: Vec<usize>,
    events: Vec<EventRecord>,
}

impl StatisticsCollector {
    pub(crate) fn record(&mut self, kind: EventKind, client: usize, time: f64, queue_len: usize) {
        self.queue_sizes.push(queue_len);
        self.events.push(EventRecord {
            kind,
            client,
            time,
            queue_len,
        });
    }

    /// Number of clients in the system after each processed event, in processing order.
    pub fn queue_sizes(&self) -> &[usize] {
        &self.queue_sizes
    }

    /// Get a shared reference to the event log.
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Derive the aggregate statistics. Means are taken over clients that have reached the server, which after a
    /// completed run is every client. Until the first arrival the whole window counts as idle.
    pub fn summarize(&self, clients: &[Client], state: &EngineState, window: Window) -> Summary {
        let served: Vec<&Client> = clients.iter().filter(|c| c.is_served()).collect();
        let length = window.length();
        let idle_time = if state.arrivals() == 0 {
            length
        } else {
            state.idle_time()
        };

        Summary {
            clients: clients.len(),
            arrivals: state.arrivals(),
            departures: state.departures(),
            mean_wait: mean(served.iter().map(|c| c.waiting_time())),
            mean_system_time: mean(served.iter().map(|c| c.system_time())),
            mean_queue_len: mean(self.queue_sizes.iter().map(|&n| n as f64)),
            utilization: (length - idle_time) / length,
            idle_time,
            tail_overrun: state.tail_overrun(),
        }
    }
}

/// Mean of the values, or zero for an empty sequence.
fn mean<I>(values: I) -> f64
where
    I: Iterator<Item = f64>,
{
    let (sum, count) = values.fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Aggregate performance statistics of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub clients: usize,
    pub arrivals: usize,
    pub departures: usize,
    pub mean_wait: f64,
    pub mean_system_time: f64,
    pub mean_queue_len: f64,
    /// `ρ = (window length - idle time) / window length`.
    pub utilization: f64,
    pub idle_time: f64,
    /// How far the last departure ran past closing, or zero.
    pub tail_overrun: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_nothing_is_zero() {
        assert_eq!(0.0, mean(std::iter::empty()));
        assert_eq!(2.0, mean(vec![1.0, 2.0, 3.0].into_iter()));
    }

    #[test]
    fn labels() {
        let mut record = EventRecord {
            kind: EventKind::Arrival,
            client: 3,
            time: 1.0,
            queue_len: 1,
        };
        assert_eq!("client 3 arrived", record.label());
        record.kind = EventKind::PostCloseDeparture;
        assert_eq!("client 3 departed after close", record.label());
    }

    #[test]
    fn samples_follow_records() {
        let mut collector = StatisticsCollector::default();
        collector.record(EventKind::Arrival, 1, 0.5, 1);
        collector.record(EventKind::Arrival, 2, 0.7, 2);
        collector.record(EventKind::Departure, 1, 0.9, 1);
        assert_eq!(&[1, 2, 1], collector.queue_sizes());
        assert_eq!(3, collector.events().len());
        assert_eq!(0.7, collector.events()[1].time);
    }
}
