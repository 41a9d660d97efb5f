use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Local;
use std::time::Duration;

use crate::shared::format::format_number;

/// One console line per request: local time, duration, body size, status, method, path.
/// The time is cyan for 200 responses and yellow otherwise.
fn log_line(status: StatusCode, duration: Duration, size: &str, method: &Method, path: &str) -> String {
    let color_code = if status == StatusCode::OK { "36" } else { "33" };
    format!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        color_code,
        Local::now().format("%H:%M:%S"),
        duration.as_millis(),
        size,
        status.as_u16(),
        method.as_str(),
        path
    )
}

pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // buffered to measure the real size
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(_) => {
            println!(
                "{}",
                log_line(parts.status, start.elapsed(), "error", &method, uri.path())
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    println!(
        "{}",
        log_line(
            parts.status,
            start.elapsed(),
            &format_number(bytes.len()),
            &method,
            uri.path()
        )
    );

    Response::from_parts(parts, Body::from(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_line_colors_by_status() {
        let ok = log_line(StatusCode::OK, Duration::from_millis(12), "1,024", &Method::POST, "/api/d100/overview");
        assert!(ok.starts_with("\x1b[36m"));
        assert!(ok.contains("|    12ms |        1,024 | 200   POST /api/d100/overview"));

        let denied = log_line(StatusCode::UNAUTHORIZED, Duration::ZERO, "0", &Method::GET, "/api/navigation");
        assert!(denied.starts_with("\x1b[33m"));
    }
}
