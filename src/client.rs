/// Timing record of a single client passing through the system.
///
/// Created on arrival with only [`arrival_time`] meaningful, then stamped once more when the client reaches the
/// server. Service start and departure stay `NaN` for a client that has not been served yet.
///
/// [`arrival_time`]: Client::arrival_time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Client {
    arrival_time: f64,
    service_start_time: f64,
    departure_time: f64,
}

impl Client {
    pub(crate) fn arrived(time: f64) -> Self {
        Self {
            arrival_time: time,
            service_start_time: f64::NAN,
            departure_time: f64::NAN,
        }
    }

    /// Record that service began at `start` and lasts `duration`.
    pub(crate) fn begin_service(&mut self, start: f64, duration: f64) {
        self.service_start_time = start;
        self.departure_time = start + duration;
    }

    /// Instant the client arrived.
    pub fn arrival_time(&self) -> f64 {
        self.arrival_time
    }

    /// Instant service began, `NaN` until then.
    pub fn service_start_time(&self) -> f64 {
        self.service_start_time
    }

    /// Instant the client leaves, `NaN` until service is scheduled.
    pub fn departure_time(&self) -> f64 {
        self.departure_time
    }

    /// Whether service has been scheduled for this client.
    pub fn is_served(&self) -> bool {
        !self.service_start_time.is_nan()
    }

    /// Time spent in line before reaching the server, never negative.
    pub fn waiting_time(&self) -> f64 {
        (self.service_start_time - self.arrival_time).max(0.0)
    }

    /// Time spent at the server.
    pub fn service_time(&self) -> f64 {
        self.departure_time - self.service_start_time
    }

    /// Time from arrival to departure.
    pub fn system_time(&self) -> f64 {
        self.departure_time - self.arrival_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_times() {
        let mut client = Client::arrived(2.0);
        assert!(!client.is_served());

        client.begin_service(3.5, 1.25);
        assert!(client.is_served());
        assert_eq!(1.5, client.waiting_time());
        assert_eq!(1.25, client.service_time());
        assert_eq!(4.75, client.departure_time());
        assert_eq!(2.75, client.system_time());
    }

    #[test]
    fn immediate_service_has_no_wait() {
        let mut client = Client::arrived(2.0);
        client.begin_service(2.0, 0.5);
        assert_eq!(0.0, client.waiting_time());
    }
}
