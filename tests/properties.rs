mod util;

use queuesim::report::{client_table, event_table};
use queuesim::*;
use rand::SeedableRng;
use rand_distr::{Distribution, Exp};
use rand_pcg::Pcg64;

type DaySimulation = Simulation<DailyProfile, RngSource<Pcg64>>;

fn reference_day(seed: u64) -> DaySimulation {
    let source = RngSource::new(Pcg64::seed_from_u64(seed));
    Simulation::new(Parameters::default(), DailyProfile, source).expect("default parameters should be valid")
}

/// Step the simulation to completion, checking the scheduling invariants after every event.
fn run_checked(sim: &mut DaySimulation) {
    let mut last_arrival = f64::NEG_INFINITY;
    let mut last_departure = f64::NEG_INFINITY;
    let mut last_idle = 0.0;

    loop {
        let kind = sim.step().expect("reference day should not fail");
        let state = *sim.state();

        assert_eq!(state.arrivals() - state.departures(), state.in_system());
        assert_eq!(state.in_system() == 0, state.next_departure() == f64::INFINITY);
        assert_eq!(state.in_system(), sim.waiting_line().count());
        if let Some(head) = sim.waiting_line().next() {
            assert!(head.is_served(), "head of the line should be in service");
            assert_eq!(head.departure_time(), state.next_departure());
        }
        assert!(
            sim.waiting_line().skip(1).all(|c| !c.is_served()),
            "only the head should be in service"
        );
        assert!(state.idle_time() >= last_idle, "idle time decreased");
        last_idle = state.idle_time();

        match kind {
            EventKind::Arrival => {
                assert!(state.now() >= last_arrival, "arrivals out of order");
                last_arrival = state.now();
            },
            EventKind::Departure | EventKind::PostCloseDeparture => {
                assert!(state.now() >= last_departure, "departures out of order");
                last_departure = state.now();
            },
            EventKind::Terminate => break,
        }
    }
}

#[test]
fn invariants_hold_throughout_reference_days() {
    for seed in 0..25 {
        let mut sim = reference_day(seed);
        run_checked(&mut sim);

        let window = sim.parameters().window();
        let summary = sim.summary();
        assert_eq!(summary.arrivals, summary.departures);
        assert_eq!(summary.clients, summary.arrivals);
        assert!(
            (0.0..=1.0).contains(&summary.utilization),
            "utilization {} out of range for seed {}",
            summary.utilization,
            seed
        );
        assert_floats_near_equal!(
            window.length(),
            summary.idle_time + summary.utilization * window.length(),
            "idle and busy time should reconstruct the window"
        );
        assert!(summary.tail_overrun >= 0.0);
        assert!(sim.clients().iter().all(|c| c.arrival_time() <= window.close));
        assert!(sim.clients().iter().all(Client::is_served));
    }
}

#[test]
fn departures_follow_arrival_order() {
    let mut sim = reference_day(3);
    sim.run().unwrap();
    for pair in sim.clients().windows(2) {
        assert!(pair[0].departure_time() <= pair[1].service_start_time());
    }
}

#[test]
fn identical_streams_reproduce_identical_runs() {
    let mut first = reference_day(11434450237083315284);
    let mut second = reference_day(11434450237083315284);
    first.run().unwrap();
    second.run().unwrap();

    assert_eq!(first.events(), second.events());
    assert_eq!(first.clients(), second.clients());
    assert_eq!(first.summary(), second.summary());
    assert_eq!(
        event_table(first.events()).to_string(),
        event_table(second.events()).to_string()
    );
    assert_eq!(
        client_table(first.clients()).to_string(),
        client_table(second.clients()).to_string()
    );
}

#[test]
fn scripted_streams_reproduce_identical_runs() {
    let draws = vec![0.31, 0.72, 0.05, 0.44, 0.93, 0.18, 0.67, 0.25, 0.59, 0.81, 0.12];
    let parameters = Parameters::new(0.0, 8.0, 2.0, 3.0).unwrap();
    let run = || {
        let mut sim = Simulation::new(parameters, ConstantRate(1.5), SequenceSource::new(draws.clone())).unwrap();
        sim.run().unwrap();
        (sim.events().to_vec(), sim.summary())
    };
    assert_eq!(run(), run());
}

#[test]
fn thinning_matches_homogeneous_exponential() {
    // a constant rate of 2 thinned from 4 should look like an exponential(2) process
    let process = ArrivalProcess::new(ConstantRate(2.0), 4.0);
    let mut source = RngSource::new(Pcg64::seed_from_u64(5));
    let samples = 20_000;

    let mut t = 0.0;
    let mut thinned_sum = 0.0;
    for _ in 0..samples {
        let next = process.next_arrival(t, &mut source);
        thinned_sum += next - t;
        t = next;
    }

    let reference = Exp::new(2.0).unwrap();
    let mut rng = Pcg64::seed_from_u64(6);
    let reference_sum: f64 = (0..samples).map(|_| reference.sample(&mut rng)).sum();

    let thinned_mean = thinned_sum / samples as f64;
    let reference_mean = reference_sum / samples as f64;
    assert!((thinned_mean - 0.5).abs() < 0.03, "thinned mean {}", thinned_mean);
    assert!((reference_mean - 0.5).abs() < 0.03, "reference mean {}", reference_mean);
}

#[test]
fn client_cap_limits_reference_day() {
    let source = RngSource::new(Pcg64::seed_from_u64(8));
    let parameters = Parameters::default().with_client_cap(6);
    let mut sim = Simulation::new(parameters, DailyProfile, source).unwrap();
    sim.run().unwrap();

    assert_eq!(6, sim.clients().len());
    assert_eq!(12, sim.events().len());
    assert_eq!(6, client_table(sim.clients()).len());
}
