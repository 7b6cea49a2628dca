//! Simulates one working day at a single-server counter and prints the event log, the per-client table, and the
//! summary statistics to stdout.
//!
//! Arrivals follow the reference daily intensity profile, peaking in the early afternoon and again in the evening.
//! The counter opens at 7 and stops admitting clients at 23, but whoever is already inside gets served.
//!
//! ```text
//! cargo run --example daily_profile -- --seed 42 -v
//! cargo run --example daily_profile -- --max-clients 6 -vvv
//! ```

use clap::Parser;
use queuesim::report::{client_table, event_table};
use queuesim::{DailyProfile, Parameters, RunConfig};

/// Runs the single-server queue over the reference working day.
#[derive(Parser)]
#[command(version, about)]
struct Opt {
    /// Opening time.
    #[arg(long, default_value_t = 7.0)]
    start: f64,

    /// Closing time; no arrivals are admitted after it.
    #[arg(long, default_value_t = 23.0)]
    close: f64,

    /// Dominating arrival rate used for thinning. Must bound the profile over the window.
    #[arg(long, default_value_t = 6.0)]
    max_rate: f64,

    /// Service-rate parameter. Values below 2 can make service draws fail.
    #[arg(long, default_value_t = 10.0)]
    service_rate: f64,

    /// Stop admitting arrivals after this many clients.
    #[arg(long)]
    max_clients: Option<usize>,

    /// Seed for the random stream; drawn from the system if omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Skip checking that the dominating rate bounds the profile.
    #[arg(long)]
    no_bound_check: bool,

    /// Verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up a logger based on the given user options.
fn set_up_logger(opt: &Opt) -> Result<(), fern::InitError> {
    let log_level = match opt.verbose {
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        3 => log::LevelFilter::Trace,
        _ => log::LevelFilter::Warn,
    };
    fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("[{}] {}", record.level(), message)))
        .level(log_level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

fn main() -> eyre::Result<()> {
    let opt = Opt::parse();
    set_up_logger(&opt)?;

    let mut parameters = Parameters::new(opt.start, opt.close, opt.max_rate, opt.service_rate)?;
    if let Some(cap) = opt.max_clients {
        parameters = parameters.with_client_cap(cap);
    }
    let config = RunConfig {
        parameters,
        seed: opt.seed,
        verify_bound: !opt.no_bound_check,
        ..RunConfig::default()
    };

    let mut sim = config.build(DailyProfile)?;
    sim.run()?;

    println!("{}", event_table(sim.events()));
    println!("{}", client_table(sim.clients()));
    println!("{}", sim.summary());
    Ok(())
}
