mod cli;
mod init;
mod render;
mod shell;

use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter (e.g. `pawlike=debug`).
const LOG_ENV: &str = "PAWLIKE_LOG";

pub async fn run(args: Vec<String>) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cmd = cli::parse_args(&args)?;
    match cmd {
        cli::Command::Help(topic) => {
            cli::print_help(topic);
            Ok(())
        }
        cli::Command::Init(args) => init::run(args),
        cli::Command::Shell(args) => {
            init_tracing();
            shell::run(args).await
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Err(e) = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("tracing init failed: {e}");
    }
}
