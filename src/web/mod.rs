//! # Web application module
//!
//! Contains the application and the handlers for the three routes:
//! * Trigger a download (`/add`)
//! * Render the feed as RSS 2.0 (`/feed.xml`)
//! * Serve the downloaded media files (`/files/*`)

mod app;
mod errors;
mod handlers;

pub use app::{build_app, AppState};
