use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug)]
pub enum PodfyError {
    BadUrl,
}

impl std::fmt::Display for PodfyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for PodfyError {}

impl IntoResponse for PodfyError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            PodfyError::BadUrl => {
                (StatusCode::BAD_REQUEST, "ERR: Bad url\n")
            }
        };

        (status, body).into_response()
    }
}
