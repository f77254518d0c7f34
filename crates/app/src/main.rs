use std::path::PathBuf;

use anyhow::Context;

use pantry_app::{Scenario, SCENARIO_ENV};

fn main() -> anyhow::Result<()> {
    pantry_observability::init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(SCENARIO_ENV).map(PathBuf::from));

    let scenario = match path {
        Some(path) => Scenario::load(&path)?,
        None => {
            tracing::info!("no scenario given; using the bundled demo");
            Scenario::demo().context("bundled demo scenario is invalid")?
        }
    };

    let today = chrono::Local::now().date_naive();
    let report = pantry_app::run(&scenario, today)?;
    print!("{report}");
    Ok(())
}
