use axum::body::to_bytes;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Форматирование числа с разделителями триад: 1234567 -> "1.234.567"
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Middleware для логирования HTTP запросов: метод, путь, статус,
/// длительность и размер ответа
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Читаем тело ответа, чтобы узнать реальный размер
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(
                "{} {} -> {} | {}ms | failed to read body: {}",
                method,
                uri.path(),
                parts.status.as_u16(),
                start.elapsed().as_millis(),
                e
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let status = parts.status.as_u16();
    let duration = start.elapsed().as_millis();
    let size = format_number(bytes.len());

    if parts.status.is_server_error() {
        tracing::error!("{} {} -> {} | {}ms | {} bytes", method, uri.path(), status, duration, size);
    } else if parts.status.is_client_error() {
        tracing::warn!("{} {} -> {} | {}ms | {} bytes", method, uri.path(), status, duration, size);
    } else {
        tracing::info!("{} {} -> {} | {}ms | {} bytes", method, uri.path(), status, duration, size);
    }

    Response::from_parts(parts, Body::from(bytes))
}
