//! Export one day of Basis biometric chart data as JSON.
//! Provides argument validation, request assembly, and a small async
//! client for the chart endpoint.

pub mod args;
pub mod client;
pub mod error;
pub mod output;
pub mod request;
pub mod runner;

pub use args::{ExportArgs, RawArgs, Username, is_short_md5, parse_date};
pub use client::Client;
pub use error::{ArgsError, ExportError};
pub use output::render;
pub use request::{DateRange, RequestSpec, build_request};
pub use runner::{Outcome, resolve_and_run, run};
