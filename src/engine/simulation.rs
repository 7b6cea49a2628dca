use super::state::{next_event, EngineState, EventKind, Phase};
use crate::stats::{EventRecord, StatisticsCollector, Summary};
use crate::{ArrivalProcess, Client, Error, IntensityProfile, Parameters, RandomSource, Result, ServiceTimeGenerator};

use ordered_float::OrderedFloat;
use std::collections::VecDeque;
use std::fmt::Formatter;

/// A single-server queue fed by a nonhomogeneous Poisson arrival process.
///
/// A [`Simulation`] owns its scheduling state, the registry of every client that has arrived, the FIFO waiting line,
/// and the statistics collected along the way. The random source is injected, so a run is fully determined by the
/// parameters, the intensity profile, and the stream of uniform draws.
///
/// The expected workflow for a Simulation is:
///
/// 1. Validate [`Parameters`] and pick an [`IntensityProfile`] and a [`RandomSource`].
/// 2. Pass them to [`new()`], which also draws the first arrival instant.
/// 3. Call [`run()`], or drive the engine one event at a time with [`step()`]. Handle any error either might return.
/// 4. Use [`clients()`], [`events()`], and [`summary()`] to process the results.
///
/// After an error the engine's state is no longer meaningful and it should not be stepped further.
///
/// [`new()`]: Simulation::new
/// [`run()`]: Simulation::run
/// [`step()`]: Simulation::step
/// [`clients()`]: Simulation::clients
/// [`events()`]: Simulation::events
/// [`summary()`]: Simulation::summary
#[derive(Debug)]
pub struct Simulation<Profile, Source> {
    parameters: Parameters,
    arrival_process: ArrivalProcess<Profile>,
    service: ServiceTimeGenerator,
    source: Source,
    state: EngineState,
    /// Every client that has arrived, in arrival order.
    clients: Vec<Client>,
    /// Indices into `clients` of those not yet departed. The head is in service.
    line: VecDeque<usize>,
    statistics: StatisticsCollector,
}

impl<Profile, Source> Simulation<Profile, Source>
where
    Profile: IntensityProfile,
    Source: RandomSource,
{
    /// Initialize a Simulation with an empty system at the window's start and its first arrival drawn from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the service rate cannot parameterize a [`ServiceTimeGenerator`].
    pub fn new(parameters: Parameters, profile: Profile, mut source: Source) -> Result<Self> {
        let service = ServiceTimeGenerator::new(parameters.service_rate())?;
        let arrival_process = ArrivalProcess::new(profile, parameters.max_arrival_rate());
        let start = parameters.window().start;

        let first_arrival = if parameters.client_cap() == Some(0) {
            f64::INFINITY
        } else {
            arrival_process.next_arrival(start, &mut source)
        };

        Ok(Self {
            parameters,
            arrival_process,
            service,
            source,
            state: EngineState::opening(start, first_arrival),
            clients: Vec::new(),
            line: VecDeque::new(),
            statistics: StatisticsCollector::default(),
        })
    }

    /// Process events until the window is closed and the system has drained.
    ///
    /// # Errors
    ///
    /// Forwards the first error returned by [`step()`], most likely an [`Error::ServiceDomain`] from a service rate
    /// that is too small for the service-time formula.
    ///
    /// [`step()`]: Simulation::step
    pub fn run(&mut self) -> Result {
        let window = self.parameters.window();
        log::info!(
            "simulating [{}, {}] with λ_max = {} and service rate {}",
            window.start,
            window.close,
            self.parameters.max_arrival_rate(),
            self.parameters.service_rate(),
        );

        while self.step()? != EventKind::Terminate {}

        log::info!(
            "terminated at t = {:.5} after {} arrivals; idle {:.5}, overrun {:.5}",
            self.state.now,
            self.state.arrivals,
            self.state.idle_time,
            self.state.tail_overrun,
        );
        Ok(())
    }

    /// Process exactly one event, returning which kind it was. Once the run is over every call returns
    /// [`EventKind::Terminate`] without changing anything.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ServiceDomain`] if a service duration cannot be drawn, or [`Error::Desync`] if the waiting line
    /// no longer matches the engine's counters.
    pub fn step(&mut self) -> Result<EventKind> {
        let kind = next_event(&self.state, &self.parameters.window());
        match kind {
            EventKind::Arrival => self.handle_arrival()?,
            EventKind::Departure | EventKind::PostCloseDeparture => self.handle_departure(kind)?,
            EventKind::Terminate => self.handle_termination(),
        }
        Ok(kind)
    }

    fn admits_more(&self) -> bool {
        self.parameters
            .client_cap()
            .map_or(true, |cap| self.state.arrivals < cap)
    }

    fn handle_arrival(&mut self) -> Result {
        let now = self.state.next_arrival;
        self.state.now = now;
        self.state.arrivals += 1;
        self.state.in_system += 1;

        let index = self.clients.len();
        self.clients.push(Client::arrived(now));
        self.line.push_back(index);

        self.state.next_arrival = if self.admits_more() {
            self.arrival_process.next_arrival(now, &mut self.source)
        } else {
            log::debug!("client cap reached at t = {:.5}; no further arrivals", now);
            f64::INFINITY
        };

        if self.state.in_system == 1 {
            self.begin_service(index)?;
        }

        self.statistics
            .record(EventKind::Arrival, self.state.arrivals, now, self.state.in_system);
        log::trace!(
            "t = {:.5}: client {} arrived, {} in system",
            now,
            self.state.arrivals,
            self.state.in_system
        );
        Ok(())
    }

    fn handle_departure(&mut self, kind: EventKind) -> Result {
        let now = self.state.next_departure;
        let window = self.parameters.window();

        let index = match self.line.pop_front() {
            Some(index) => index,
            None => {
                return Err(Error::Desync {
                    time: now,
                    detail: "departure scheduled with an empty waiting line",
                })
            },
        };

        if kind == EventKind::PostCloseDeparture && window.admits(self.state.now) {
            log::debug!(
                "window closed at {} with {} clients in system; draining",
                window.close,
                self.state.in_system
            );
        }

        self.state.now = now;
        self.state.departures += 1;
        self.state.in_system -= 1;

        // the server sat idle from the previous departure (or the window start) until a client who never waited
        let departing = self.clients[index];
        if departing.waiting_time() == 0.0 {
            let idle_since = self.state.last_departure.unwrap_or(window.start);
            self.state.idle_time += departing.arrival_time() - idle_since;
        }
        self.state.last_departure = Some(departing.departure_time());

        if self.state.in_system > 0 {
            let next = match self.line.front() {
                Some(&next) => next,
                None => {
                    return Err(Error::Desync {
                        time: now,
                        detail: "clients in system but none waiting",
                    })
                },
            };
            self.begin_service(next)?;
        } else {
            self.state.next_departure = f64::INFINITY;
        }

        self.statistics
            .record(kind, self.state.departures, departing.departure_time(), self.state.in_system);
        log::trace!(
            "t = {:.5}: client {} departed, {} in system",
            now,
            self.state.departures,
            self.state.in_system
        );
        Ok(())
    }

    /// Put the client at `index` in service starting now.
    fn begin_service(&mut self, index: usize) -> Result {
        let duration = self.service.sample(&mut self.source)?;
        let client = &mut self.clients[index];
        client.begin_service(self.state.now, duration);
        self.state.next_departure = client.departure_time();
        log::debug!(
            "t = {:.5}: service begins, expected departure {:.5}",
            self.state.now,
            self.state.next_departure
        );
        Ok(())
    }

    fn handle_termination(&mut self) {
        let window = self.parameters.window();
        let last_departure = self
            .clients
            .iter()
            .map(|c| OrderedFloat(c.departure_time()))
            .max()
            .map_or(window.close, |t| t.0);
        self.state.tail_overrun = (last_departure - window.close).max(0.0);

        // no departure ever happened, so nothing accounted for the idle server
        if self.state.arrivals == 0 {
            self.state.idle_time = window.length();
        }
    }
}

impl<Profile, Source> Simulation<Profile, Source> {
    /// Get a shared reference to the scheduling state.
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Get a shared reference to the parameters.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Phase the engine is in, judged by the event it would process next.
    pub fn phase(&self) -> Phase {
        self.state.phase(&self.parameters.window())
    }

    /// Every client that has arrived so far, in arrival order.
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Clients that have not departed yet, head first. The head is the client in service.
    pub fn waiting_line(&self) -> impl Iterator<Item = &Client> + '_ {
        self.line.iter().map(move |&index| &self.clients[index])
    }

    /// Get a shared reference to the event log.
    pub fn events(&self) -> &[EventRecord] {
        self.statistics.events()
    }

    /// Clients in the system after each processed event.
    pub fn queue_sizes(&self) -> &[usize] {
        self.statistics.queue_sizes()
    }

    /// Get a shared reference to the statistics collector.
    pub fn statistics(&self) -> &StatisticsCollector {
        &self.statistics
    }

    /// Aggregate statistics of the run so far. Before the first arrival the server counts as idle for the whole
    /// window, so a run that never admits anybody reports zero utilization at any point.
    pub fn summary(&self) -> Summary {
        self.statistics
            .summarize(&self.clients, &self.state, self.parameters.window())
    }

    /// Get an exclusive reference to the random source, e.g. to reuse its stream afterwards.
    pub fn source_mut(&mut self) -> &mut Source {
        &mut self.source
    }
}

impl<Profile, Source> std::fmt::Display for Simulation<Profile, Source> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Simulation at time {} with {} clients in system",
            self.state.now, self.state.in_system
        )
    }
}
