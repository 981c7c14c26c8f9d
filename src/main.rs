use basis_export::{Client, RawArgs, resolve_and_run};
use clap::Parser;
use std::io;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(
    name = "basis-export",
    about = "Fetch a day of Basis biometric data and print it as JSON"
)]
struct Cli {
    /// Short-MD5 hash Basis uses as the username
    #[arg(value_name = "USERNAME")]
    username: Option<String>,

    /// Date to get data for [default: yesterday]
    #[arg(short, long)]
    date: Option<String>,

    /// Pretty-print the data
    #[arg(short, long)]
    pretty: bool,

    /// Chart API base URL
    #[arg(long, env = "BASIS_API_URL", hide = true)]
    base_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(
        long,
        env = "BASIS_TIMEOUT_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let client = match Client::with_timeout(Duration::from_secs(cli.timeout)) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let client = match cli.base_url {
        Some(url) => client.with_base_url(url),
        None => client,
    };

    let raw = RawArgs {
        username: cli.username.as_deref(),
        date: cli.date.as_deref(),
        pretty: cli.pretty,
    };
    resolve_and_run(&client, raw, &mut io::stdout().lock(), &mut io::stderr().lock())
        .await
        .into()
}
