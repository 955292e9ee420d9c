//! Logging verbosity helpers

/// Log filter for a `-v` count; `RUST_LOG` overrides it when set
pub fn get_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "reposync=debug,info",
        _ => "trace",
    }
}
