use anyhow::Result;
use chrono::Local;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use ukecon::{
    config::Config,
    fetch::{FixtureTableSource, HttpTableSource, TableSource},
    pipeline::build_charts,
    process::covid_overrides,
};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
    info!("startup");

    // ─── 2) configuration + display target ───────────────────────────
    let cfg = Config::load()?;
    let target = cfg.display_target();
    info!(?target, gdp = %cfg.gdp.path.display(), "configured");

    // ─── 3) recession table source ───────────────────────────────────
    let source: Box<dyn TableSource> = match &cfg.recessions_fixture {
        Some(path) => {
            info!(path = %path.display(), "using saved recession page");
            Box::new(FixtureTableSource::from_file(path)?)
        }
        None => Box::new(HttpTableSource::new(cfg.http_timeout())?),
    };

    // ─── 4) load, join, aggregate, build figures ─────────────────────
    let today = Local::now().date_naive();
    let charts = build_charts(&cfg, source.as_ref(), &covid_overrides()?, today)?;

    // ─── 5) show ─────────────────────────────────────────────────────
    target.show("gdp_recessions", "UK GDP and recessions", &charts.gdp)?;
    target.show("labour_market", "UK unemployment and earnings", &charts.labour)?;

    info!("all done");
    Ok(())
}
