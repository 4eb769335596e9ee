//! Settings that change how the router is assembled.

use std::path::PathBuf;

use clap::ValueEnum;

/// The environment the server is running in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Log the body of every request and response.
    #[default]
    Development,
    /// Serve the built client from the static directory, if one is set.
    Production,
}

/// The configuration for [build_router](crate::build_router).
#[derive(Debug, Clone, Default)]
pub struct RouterConfig {
    /// The environment the server is running in.
    pub mode: Mode,
    /// The directory containing the built client, e.g. `client/build`.
    ///
    /// Only used in [Mode::Production].
    pub static_dir: Option<PathBuf>,
    /// The origin that browsers may call the API from, e.g. `http://localhost:3000`.
    pub cors_origin: Option<String>,
}
