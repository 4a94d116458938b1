//! # Downloader invoker
//!
//! Download requests go onto a bounded queue drained by a small worker
//! pool, so a burst of `/add` calls can't fork an unbounded number of
//! subprocesses. Each job runs `youtube-dl` with the media directory as its
//! working directory, asking for the companion metadata, thumbnail, and
//! description files and for sanitized filenames.
//!
//! This whole path is fire-and-forget: the HTTP response never waits on a
//! download, a full queue drops the job with a warning, and a failed or
//! unlaunchable subprocess only shows up in the logs.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use tokio::process::Command;
use tokio::sync::{mpsc, Mutex};
use tracing::{error, info, warn};
use url::Url;

use crate::vars::DOWNLOADER_BIN;

/// Jobs held while all workers are busy.
pub const QUEUE_DEPTH: usize = 32;

/// Concurrent `youtube-dl` processes.
pub const WORKER_COUNT: usize = 2;

#[derive(Clone)]
pub struct Downloader {
    tx: mpsc::Sender<Url>,
}

impl Downloader {
    /// Starts the worker pool and returns the queue handle.
    pub fn spawn(media_dir: PathBuf) -> Downloader {
        let (tx, rx) = mpsc::channel(QUEUE_DEPTH);
        let rx = Arc::new(Mutex::new(rx));
        for worker in 0..WORKER_COUNT {
            tokio::spawn(run_worker(
                worker,
                Arc::clone(&rx),
                media_dir.clone(),
            ));
        }

        Downloader { tx }
    }

    #[cfg(test)]
    pub(crate) fn from_sender(tx: mpsc::Sender<Url>) -> Downloader {
        Downloader { tx }
    }

    /// Queues a URL without waiting for the download to start.
    pub fn enqueue(&self, url: Url) {
        if let Err(err) = self.tx.try_send(url) {
            warn!("download queue full, dropping request: {err}");
        }
    }
}

async fn run_worker(
    worker: usize,
    rx: Arc<Mutex<mpsc::Receiver<Url>>>,
    media_dir: PathBuf,
) {
    loop {
        let url = { rx.lock().await.recv().await };
        let Some(url) = url else {
            // queue handle dropped; nothing left to do
            break;
        };

        info!(worker, url = url.as_str(), "starting download");
        match fetch(&url, &media_dir).await {
            Ok(status) => {
                info!(worker, url = url.as_str(), %status, "downloader finished")
            }
            Err(err) => {
                error!(worker, url = url.as_str(), "couldn't launch downloader: {err}")
            }
        }
    }
}

async fn fetch(
    url: &Url,
    media_dir: &Path,
) -> std::io::Result<std::process::ExitStatus> {
    Command::new(DOWNLOADER_BIN)
        .arg(url.as_str())
        .args([
            "--write-info-json",
            "--write-thumbnail",
            "--write-description",
            "--restrict-filenames",
        ])
        .current_dir(media_dir)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn enqueue_hands_the_url_to_the_queue() {
        let (tx, mut rx) = mpsc::channel(4);
        let downloader = Downloader::from_sender(tx);

        let url = Url::parse("http://example.com/watch?v=abc").unwrap();
        downloader.enqueue(url.clone());

        assert_eq!(rx.try_recv().unwrap(), url);
    }

    #[tokio::test]
    async fn full_queue_drops_instead_of_blocking() {
        let (tx, mut rx) = mpsc::channel(1);
        let downloader = Downloader::from_sender(tx);

        downloader
            .enqueue(Url::parse("http://example.com/first").unwrap());
        downloader
            .enqueue(Url::parse("http://example.com/second").unwrap());

        assert_eq!(rx.try_recv().unwrap().as_str(), "http://example.com/first");
        assert!(rx.try_recv().is_err());
    }
}
