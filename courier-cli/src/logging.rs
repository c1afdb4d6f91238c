//! Logger installation for the `courier` binary.

use std::io::Write;

use env_logger::{Builder, Env, Target, fmt::Formatter};
use log::LevelFilter;

use crate::CliError;

/// Filter used when neither `RUST_LOG` nor `--log-level` is set.
pub(crate) const DEFAULT_FILTER: &str = "info";

/// Install a stderr logger. `level` overrides `RUST_LOG` when given.
pub(crate) fn init_logger(level: Option<LevelFilter>) -> Result<(), CliError> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    if let Some(filter) = level {
        builder.filter_level(filter);
    }
    builder
        .target(Target::Stderr)
        .format(|buf: &mut Formatter, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        });
    builder.try_init().map_err(CliError::from)
}
