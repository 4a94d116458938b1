use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use podfy::config::Config;
use podfy::downloader::Downloader;
use podfy::tracing::setup_tracing;
use podfy::vars::{LISTEN_ADDR, MEDIA_DIR};
use podfy::web::{build_app, AppState};

#[derive(Debug, Parser)]
#[command(name = "podfy", about = "Turn web videos into a podcast feed")]
struct Cli {
    /// Overrides the feed URL from the configuration file
    #[arg(long = "feed_url", value_name = "URL")]
    feed_url: Option<String>,

    /// Address to serve HTTP on
    #[arg(long, default_value = LISTEN_ADDR)]
    listen: SocketAddr,

    /// Directory downloads are stored in and served from
    #[arg(long = "media_dir", value_name = "DIR", default_value = MEDIA_DIR)]
    media_dir: PathBuf,
}

#[tokio::main]
async fn main() {
    setup_tracing();
    let cli = Cli::parse();

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            error!("Could not read config: {err}");
            process::exit(1);
        }
    };
    if let Some(feed_url) = cli.feed_url {
        config.feed_url = feed_url;
    }

    if let Err(err) = std::fs::create_dir_all(&cli.media_dir) {
        error!(
            "Could not create media dir {}: {err}",
            cli.media_dir.display()
        );
        process::exit(1);
    }

    let downloader = Downloader::spawn(cli.media_dir.clone());
    let app = build_app(Arc::new(AppState {
        config,
        downloader,
        media_dir: cli.media_dir,
    }));

    let listener = match TcpListener::bind(cli.listen).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Could not bind {}: {err}", cli.listen);
            process::exit(1);
        }
    };
    info!("listening on {}", cli.listen);

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal());
    if let Err(err) = server.await {
        error!("HTTP service exited prematurely: {err}");
        process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!("Couldn't listen for ctrl-c: {err}");
    }
}
