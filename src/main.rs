use clap::Parser;
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

use efield::{App, AppError, Config, SeedConfig, Session, Viewport};

/// Interactive 2D electrostatic field visualizer.
///
/// Left click places a positive charge, right click a negative one, T spawns
/// the test particle at the cursor.
#[derive(Debug, Parser)]
#[command(name = "efield", version, about)]
struct Cli {
    /// Viewport width in pixels.
    #[arg(long, default_value_t = 900, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Field lines seeded around each charge.
    #[arg(long, default_value_t = 20)]
    seeds_per_charge: usize,

    /// Start with no charges instead of the default dipole.
    #[arg(long)]
    empty: bool,

    /// Log filter directive, overriding RUST_LOG.
    #[arg(long)]
    log_filter: Option<String>,
}

impl Cli {
    fn config(&self) -> Config {
        Config::new()
            .with_viewport(Viewport::new(self.width, self.height))
            .with_seeds(SeedConfig::new().with_seeds_per_charge(self.seeds_per_charge))
    }
}

fn init_tracing(directive: Option<&str>) {
    let filter = match directive {
        Some(d) => EnvFilter::new(d),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("efield=info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_tracing(cli.log_filter.as_deref());

    let config = cli.config();
    let session = if cli.empty {
        Session::empty(config)
    } else {
        Session::new(config)
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(session);
    event_loop.run_app(&mut app)?;
    app.finish()
}
