use std::sync::Arc;

use axum::{
    extract::{Extension, RawForm},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error};
use url::form_urlencoded;
use url::Url;

use crate::feed::FeedBuilder;
use crate::vars::AUTH_TOKEN;
use crate::web::app::AppState;
use crate::web::errors::PodfyError;

/// `GET /feed.xml` — rebuilds the feed from the media directory on every
/// call. Always 200; a failed build degrades to an empty body and a log
/// line, matching how the rest of the download path reports trouble.
pub async fn get_feed(
    Extension(state): Extension<Arc<AppState>>,
) -> impl IntoResponse {
    let builder = FeedBuilder::new(&state.config, &state.media_dir);
    let xml = match builder.build() {
        Ok(xml) => xml,
        Err(err) => {
            error!("couldn't build feed: {err}");
            String::new()
        }
    };

    (StatusCode::OK, format!("{xml}\n"))
}

/// `GET|POST /add` — checks the shared secret, parses the target URL, and
/// queues the download. Auth failures answer 200 with an error line in the
/// body; only a malformed `url` gets a real error status.
pub async fn add(
    Extension(state): Extension<Arc<AppState>>,
    RawForm(form): RawForm,
) -> Response {
    let pairs: Vec<(String, String)> =
        form_urlencoded::parse(&form).into_owned().collect();

    let auth: Vec<&str> = pairs
        .iter()
        .filter(|(key, _)| key == "auth")
        .map(|(_, value)| value.as_str())
        .collect();
    if auth.len() != 1 {
        return (StatusCode::OK, "ERR: Auth token missing\n").into_response();
    }
    if auth[0] != AUTH_TOKEN {
        // "invaild" [sic] is the published response format
        return (StatusCode::OK, "ERR: Auth token invaild\n").into_response();
    }

    let target = pairs
        .iter()
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value.as_str())
        .unwrap_or_default();
    let url = match Url::parse(target) {
        Ok(url) => url,
        Err(err) => {
            debug!("rejecting /add with unparseable url {target:?}: {err}");
            return PodfyError::BadUrl.into_response();
        }
    };

    state.downloader.enqueue(url);
    (StatusCode::OK, "\n").into_response()
}
