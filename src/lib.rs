//! # podfy
//!
//! A small HTTP service that "podifies" web videos: a trigger endpoint hands
//! a URL to `youtube-dl`, downloaded media lands in a local directory, and a
//! podcast-style RSS 2.0 feed enumerates whatever is there so any podcast
//! client can pull the files.

pub mod config;
pub mod downloader;
pub mod feed;
pub mod tracing;
pub mod vars;
pub mod web;
