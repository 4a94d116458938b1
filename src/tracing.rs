//! Global `tracing` subscriber setup.
//!
//! The `tracing_json` cargo feature switches output to JSON lines;
//! `tracing_noansi` strips color codes from the plain formatter.

use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn setup_tracing() {
    let result = if cfg!(feature = "tracing_json") {
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter())
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let mut subscriber =
            tracing_subscriber::fmt().with_env_filter(env_filter());
        if cfg!(feature = "tracing_noansi") {
            subscriber = subscriber.with_ansi(false);
        }
        tracing::subscriber::set_global_default(subscriber.finish())
    };

    result.expect("Couldn't set global tracing subscriber");
}
