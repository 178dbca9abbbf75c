use clap::Parser;

use channel_check::cli::{self, Cli};
use channel_check::config::{config_path, load_config};
use channel_check::logging;
use channel_check::version::RunningVersion;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config.unwrap_or_else(config_path))?;
    let log_file = cli.log_file.or_else(|| config.log.file.clone());
    let guard = logging::init(log_file.as_deref())?;

    let running = RunningVersion::detect();
    let mut stdout = std::io::stdout().lock();

    let ok = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(cli::run(cli.command, &config, &running, &mut stdout))?;

    drop(guard);
    if !ok {
        std::process::exit(1);
    }

    Ok(())
}
