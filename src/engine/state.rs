use crate::Window;

/// The kinds of step the engine can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A client arrives within the window.
    Arrival,
    /// The client in service leaves before or at closing.
    Departure,
    /// The client in service leaves after closing while the system drains.
    PostCloseDeparture,
    /// The window is closed and the system is empty.
    Terminate,
}

/// Coarse lifecycle of a run, derived from what the engine would do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Arrivals may still be admitted, or departures still fall within the window.
    Open,
    /// Past closing with clients still in the system.
    Draining,
    /// Nothing left to process.
    Terminated,
}

/// Scheduling state of the single-server system.
///
/// Holds the simulated clock, the pending arrival and departure instants, the arrival and departure counters, and the
/// idle-time and overrun accumulators. The engine maintains these invariants between steps:
///
/// * `in_system == arrivals - departures`;
/// * `next_departure` is infinite exactly when `in_system == 0`;
/// * `idle_time` never decreases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineState {
    pub(super) now: f64,
    pub(super) next_arrival: f64,
    pub(super) next_departure: f64,
    pub(super) in_system: usize,
    pub(super) arrivals: usize,
    pub(super) departures: usize,
    pub(super) idle_time: f64,
    pub(super) tail_overrun: f64,
    pub(super) last_departure: Option<f64>,
}

impl EngineState {
    /// An empty system at `start` whose first arrival is pending at `first_arrival`.
    pub(super) fn opening(start: f64, first_arrival: f64) -> Self {
        Self {
            now: start,
            next_arrival: first_arrival,
            next_departure: f64::INFINITY,
            in_system: 0,
            arrivals: 0,
            departures: 0,
            idle_time: 0.0,
            tail_overrun: 0.0,
            last_departure: None,
        }
    }

    /// Current simulated time.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Pending arrival instant, infinite once no further arrival will be admitted.
    pub fn next_arrival(&self) -> f64 {
        self.next_arrival
    }

    /// Pending departure instant, infinite while the server is idle.
    pub fn next_departure(&self) -> f64 {
        self.next_departure
    }

    /// Clients in the system, counting the one in service.
    pub fn in_system(&self) -> usize {
        self.in_system
    }

    /// Arrivals admitted so far.
    pub fn arrivals(&self) -> usize {
        self.arrivals
    }

    /// Departures processed so far.
    pub fn departures(&self) -> usize {
        self.departures
    }

    /// Idle time accumulated so far.
    pub fn idle_time(&self) -> f64 {
        self.idle_time
    }

    /// How far the last departure ran past closing. Set at termination.
    pub fn tail_overrun(&self) -> f64 {
        self.tail_overrun
    }

    /// Departure instant of the most recent departure.
    pub fn last_departure(&self) -> Option<f64> {
        self.last_departure
    }

    /// Phase of the run within `window`, judged by the event that would be processed next.
    pub fn phase(&self, window: &Window) -> Phase {
        match next_event(self, window) {
            EventKind::Terminate => Phase::Terminated,
            EventKind::PostCloseDeparture => Phase::Draining,
            EventKind::Arrival | EventKind::Departure => Phase::Open,
        }
    }
}

/// Decide which event the engine processes next.
///
/// 1. An arrival, if it comes no later than the pending departure and no later than closing. Arrivals win ties.
/// 2. Otherwise a departure, if it comes no later than closing.
/// 3. Otherwise, with clients still in the system, a post-close departure.
/// 4. Otherwise the run is over.
pub fn next_event(state: &EngineState, window: &Window) -> EventKind {
    if state.next_arrival <= state.next_departure && window.admits(state.next_arrival) {
        EventKind::Arrival
    } else if window.admits(state.next_departure) {
        EventKind::Departure
    } else if state.in_system > 0 {
        EventKind::PostCloseDeparture
    } else {
        EventKind::Terminate
    }
}
