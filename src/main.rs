use std::time::Duration;

use anyhow::Result;
use clap::{arg, value_parser, ArgAction, ArgMatches, Command};
use headerscope::config::{Config, SAMPLE_URL};
use headerscope::execute::{run_interactive, Console};
use headerscope::http_request_executor::ExecutionContext;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    return Command::new("headerscope")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .arg(
            arg!(-t --timeout <SECS>)
                .help("Timeout for the plain header fetches, 0 disables it")
                .required(false)
                .default_value("5")
                .value_parser(value_parser!(u64))
                .action(ArgAction::Set),
        )
        .arg(
            arg!(--"cookie-timeout" <SECS>)
                .help("Timeout for the cookie reuse requests, none by default")
                .required(false)
                .value_parser(value_parser!(u64))
                .action(ArgAction::Set),
        )
        .arg(
            arg!(--"sample-url" <URL>)
                .help("URL fetched by the sample menu entry")
                .required(false)
                .default_value(SAMPLE_URL)
                .value_parser(value_parser!(String))
                .action(ArgAction::Set),
        )
        .arg(
            arg!(-v --verbose)
                .help("Log more to stderr, repeat for more detail")
                .action(ArgAction::Count),
        );
}

fn seconds(secs: Option<&u64>) -> Option<Duration> {
    return secs.filter(|secs| **secs > 0).map(|secs| Duration::from_secs(*secs));
}

fn config_from(matches: &ArgMatches) -> Config {
    return Config {
        fetch_timeout: seconds(matches.get_one::<u64>("timeout")),
        cookie_timeout: seconds(matches.get_one::<u64>("cookie-timeout")),
        sample_url: matches
            .get_one::<String>("sample-url")
            .cloned()
            .unwrap_or_else(|| SAMPLE_URL.to_string()),
    };
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("headerscope={}", level)));
    // stdout belongs to the interactive console
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_logging(matches.get_count("verbose"));

    let context = ExecutionContext::new(config_from(&matches))?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());
    return run_interactive(&mut console, &context);
}
