use clap::Parser;
use taskflow::cli::commands::Cli;
use taskflow::cli::handlers;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.log.as_deref()) {
        eprintln!("error: could not start logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr so they never mix with command output
fn init_tracing(filter: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let directive: Directive = filter.unwrap_or("warn").parse()?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| e.to_string())?;
    Ok(())
}
