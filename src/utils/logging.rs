//! Logging setup for the command-line generator

use log::LevelFilter;

/// Initialize the logger at `level`.
/// The RUST_LOG environment variable can override the level.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{} {:5} {}] {}",
                buf.timestamp(),
                record.level(),
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        })
        .init();
}

/// Level for the generator's progress output; `hush` keeps only warnings
pub fn level_for(hush: bool) -> LevelFilter {
    if hush {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}
