use blueprint::AppConfig;
use clap::Parser;

/// Blueprint - visual node-graph editor
#[derive(Parser)]
#[command(name = "blueprint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug mode
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), eframe::Error> {
    let cli = Cli::parse();

    // RUST_LOG still takes precedence over the default filter
    let default_filter = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    blueprint::run_app(AppConfig { debug: cli.debug })
}
