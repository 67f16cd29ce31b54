use axum::http::StatusCode;

pub async fn root() -> &'static str {
    "Hello World!"
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
