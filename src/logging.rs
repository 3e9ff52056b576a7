//! Logger setup shared by both binaries.
//!
//! Logs go to stderr so stdout carries only results. `RUST_LOG` sets the
//! baseline; `--verbose` and `--quiet` override it.

pub fn init(verbose: bool, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}
