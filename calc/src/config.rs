use clap::Parser;
use std::path::PathBuf;

/// A terminal calculator that does its arithmetic on a server
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Config {
    /// Where the arithmetic service lives
    #[clap(long, env = "CALC_SERVER", default_value = "http://localhost:8080")]
    pub server: String,

    /// Where should we write logs?
    #[clap(long)]
    data_dir: Option<PathBuf>,

    /// Which logs to keep, in `RUST_LOG` syntax
    #[clap(long, env = "CALC_LOG", default_value = "info")]
    pub log_filter: String,
}

impl Config {
    /// Get either the configured or a default data directory. If no data
    /// directory can be found (e.g. because `$HOME` is unset) we will use the
    /// current directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("dev", "calc", "calc")
                    .map(|dirs| dirs.data_local_dir().to_owned())
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
