use std::path::PathBuf;

pub const DEFAULT_CONFIG: &str = "pawlike.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Init,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    Shell(ShellArgs),
    Init(InitArgs),
}

#[derive(Debug, Clone, Default)]
pub struct ShellArgs {
    /// Explicit config file; when unset `pawlike.toml` is used if present.
    pub config: Option<PathBuf>,
    pub api_url: Option<String>,
    pub offline: bool,
}

#[derive(Debug, Clone)]
pub struct InitArgs {
    pub config: PathBuf,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1).map(|s| s.as_str()).peekable();

    match it.peek() {
        Some(&"init") => {
            it.next();
            parse_init(it)
        }
        _ => parse_shell(it),
    }
}

fn parse_shell<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut args = ShellArgs::default();

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Root)),
            "--config" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--config requires a value");
                };
                args.config = Some(PathBuf::from(v));
            }
            _ if token.starts_with("--config=") => {
                args.config = Some(PathBuf::from(token.trim_start_matches("--config=")));
            }
            "--api-url" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--api-url requires a value");
                };
                args.api_url = Some(v.to_string());
            }
            _ if token.starts_with("--api-url=") => {
                args.api_url = Some(token.trim_start_matches("--api-url=").to_string());
            }
            "--offline" => args.offline = true,
            _ if token.starts_with('-') => anyhow::bail!("unknown option: {token}"),
            _ => anyhow::bail!("unknown command: {token}"),
        }
    }

    if args.offline && args.api_url.is_some() {
        anyhow::bail!("--offline cannot be combined with --api-url");
    }
    Ok(Command::Shell(args))
}

fn parse_init<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut config = PathBuf::from(DEFAULT_CONFIG);

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Init)),
            "--config" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--config requires a value");
                };
                config = PathBuf::from(v);
            }
            _ if token.starts_with("--config=") => {
                config = PathBuf::from(token.trim_start_matches("--config="));
            }
            _ => anyhow::bail!("unknown argument for init: {token}"),
        }
    }

    Ok(Command::Init(InitArgs { config }))
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
pawlike - browse random dogs and like your favourites

USAGE:
  pawlike [OPTIONS]
  pawlike init [OPTIONS]

COMMANDS:
  init                  Write a starter pawlike.toml

OPTIONS:
  --config <FILE>       Config file path (default: pawlike.toml if present)
  --api-url <URL>       Override api.base_url from config
  --offline             Use a built-in in-memory backend
  -h, --help            Print help

ENVIRONMENT:
  PAWLIKE_API_URL       API root when no config file is found
  PAWLIKE_TIMEOUT_SECS  Request timeout when no config file is found
  PAWLIKE_LOG           Log filter (default: warn)"
            );
        }
        HelpTopic::Init => {
            println!(
                "\
USAGE:
  pawlike init [OPTIONS]

OPTIONS:
  --config <FILE>       Config file path (default: pawlike.toml)
  -h, --help            Print help"
            );
        }
    }
}
