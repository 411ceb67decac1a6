use brrtcors::cli::run_cli;
use brrtcors::logging::{init_logging_with_config, LogConfig};

fn main() -> anyhow::Result<()> {
    // stdout is reserved for command output
    let _guard = init_logging_with_config(&LogConfig::for_cli())?;
    run_cli()
}
