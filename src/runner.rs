use crate::args::{ExportArgs, RawArgs};
use crate::client::Client;
use crate::error::ExportError;
use crate::output::render;
use log::debug;
use std::io::Write;
use std::process::ExitCode;

/// Terminal state of a single export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
    /// Arguments were rejected; no request was made.
    Usage,
}

impl Outcome {
    pub fn code(self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::Failure => 1,
            // same status clap uses for its own usage errors
            Outcome::Usage => 2,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.code())
    }
}

/// Validate `raw` and, only if it is accepted, run the export.
pub async fn resolve_and_run<O, E>(
    client: &Client,
    raw: RawArgs<'_>,
    out: &mut O,
    err: &mut E,
) -> Outcome
where
    O: Write,
    E: Write,
{
    match raw.resolve() {
        Ok(args) => run(client, &args, out, err).await,
        Err(e) => {
            report(err, &e);
            Outcome::Usage
        }
    }
}

/// Fetch the requested day and write it to `out`, or a diagnostic to `err`.
///
/// Nothing is written to `out` unless the whole payload was received and
/// rendered.
pub async fn run<O, E>(client: &Client, args: &ExportArgs, out: &mut O, err: &mut E) -> Outcome
where
    O: Write,
    E: Write,
{
    match export(client, args).await {
        Ok(rendered) => match writeln!(out, "{rendered}").and_then(|_| out.flush()) {
            Ok(()) => Outcome::Success,
            Err(e) => {
                report(err, &ExportError::Io(e));
                Outcome::Failure
            }
        },
        Err(e) => {
            report(err, &e);
            Outcome::Failure
        }
    }
}

async fn export(client: &Client, args: &ExportArgs) -> Result<String, ExportError> {
    let data = client.export(&args.username, args.date).await?;
    debug!("Rendering response (pretty={})", args.pretty);
    Ok(render(&data, args.pretty)?)
}

fn report<E: Write>(err: &mut E, error: &ExportError) {
    // stderr failures leave nothing else to report to
    let _ = writeln!(err, "error: {error}");
    if let ExportError::Status { body, .. } = error
        && !body.is_empty()
    {
        let _ = writeln!(err, "{body}");
    }
}
