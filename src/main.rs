mod earth_position;
mod error;
mod fetcher;
mod overhead_pass;
mod position;
mod roster;
#[cfg(test)]
mod test_server;
mod time;
mod ui;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::error::TrackerError;
use crate::fetcher::Fetcher;
use crate::overhead_pass::{compute_overhead_pass, Observer};
use crate::position::parse_position;
use crate::roster::parse_roster;
use crate::ui::{Assets, Window};

const ASTROS_API: &str = "http://api.open-notify.org/astros.json";
const ISS_NOW_API: &str = "http://api.open-notify.org/iss-now.json";
const ISS_PASS_API: &str = "http://api.open-notify.org/iss-pass.json";

/// Logs go to stderr, stdout only carries the report
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "iss_visualizer=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<(), TrackerError> {
    let fetcher = Fetcher::new()?;

    let position = parse_position(&fetcher.fetch_or_exit(ISS_NOW_API, None))?;
    let pass = compute_overhead_pass(&fetcher, ISS_PASS_API, Observer::INDIANAPOLIS)?;
    let roster = parse_roster(&fetcher.fetch_or_exit(ASTROS_API, None))?;
    info!(astronauts = roster.count, latitude = position.latitude,
          longitude = position.longitude, "station data ready");

    println!();
    print!("{roster}");
    println!();
    println!("{}", position.report());
    println!();

    // Asset errors must surface before a window is shown
    let assets = Assets::load()?;
    Window::open(&assets, &position, &pass)?.run();

    Ok(())
}

fn main() {
    init_tracing();

    if let Err(err) = run() {
        err.exit();
    }
}
