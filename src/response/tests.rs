//! Tests for the response writer.

#[cfg(test)]
mod tests {
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tokio::io::AsyncWrite;

    use crate::headers::Headers;
    use crate::response::{
        chunked_headers, default_headers, Error, ResponseWriter, StatusCode, WriterState,
    };

    // Sink whose writes always fail
    struct BrokenPipe;

    impl AsyncWrite for BrokenPipe {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe")))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(StatusCode::OK.status_line(), "HTTP/1.1 200 OK\r\n");
        assert_eq!(StatusCode::BAD_REQUEST.status_line(), "HTTP/1.1 400 Bad Request\r\n");
        assert_eq!(StatusCode::FORBIDDEN.status_line(), "HTTP/1.1 403 Forbidden\r\n");
        assert_eq!(StatusCode::NOT_FOUND.status_line(), "HTTP/1.1 404 Not Found\r\n");
        assert_eq!(
            StatusCode::METHOD_NOT_ALLOWED.status_line(),
            "HTTP/1.1 405 Method Not Allowed\r\n"
        );
        assert_eq!(
            StatusCode::INTERNAL_SERVER_ERROR.status_line(),
            "HTTP/1.1 500 Internal Server Error\r\n"
        );
        assert_eq!(StatusCode(418).status_line(), "HTTP/1.1 418\r\n");
        assert_eq!(StatusCode(418).to_string(), "418");
        assert_eq!(StatusCode::from(418).as_u16(), 418);
        assert_eq!(StatusCode::from(599).reason_phrase(), None);
    }

    #[test]
    fn test_default_headers() {
        let headers = default_headers(42);
        assert_eq!(headers.get("Content-Length"), Some("42"));
        assert_eq!(headers.get("Connection"), Some("close"));
        assert_eq!(headers.get("Content-Type"), Some("text/plain"));
        assert!(!headers.contains("transfer-encoding"));
    }

    #[test]
    fn test_chunked_headers_omit_content_length() {
        let headers = chunked_headers();
        assert_eq!(headers.get("transfer-encoding"), Some("chunked"));
        assert_eq!(headers.get("connection"), Some("close"));
        assert!(!headers.contains("content-length"));
    }

    #[tokio::test]
    async fn test_plain_response() {
        let mut out = Vec::new();
        let mut writer = ResponseWriter::new(&mut out);

        let mut headers = default_headers(5);
        headers.replace("content-type", "text/html");

        writer.write_status_line(StatusCode::OK).await.unwrap();
        writer.write_headers(&headers).await.unwrap();
        assert_eq!(writer.write_body(b"he").await.unwrap(), 2);
        assert_eq!(writer.write_body(b"llo").await.unwrap(), 3);
        assert_eq!(writer.state(), WriterState::BodyWritten);

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "HTTP/1.1 200 OK\r\n\
             content-length: 5\r\n\
             connection: close\r\n\
             content-type: text/html\r\n\
             \r\n\
             hello"
        );
    }

    #[tokio::test]
    async fn test_body_before_headers_is_rejected() {
        let mut out = Vec::new();
        let mut writer = ResponseWriter::new(&mut out);

        let result = writer.write_body(b"too early").await;
        assert!(matches!(
            result,
            Err(Error::OutOfOrder { operation: "write_body", state: WriterState::Init })
        ));

        writer.write_status_line(StatusCode::OK).await.unwrap();
        let written_so_far = b"HTTP/1.1 200 OK\r\n".len();
        let result = writer.write_body(b"still too early").await;
        assert!(matches!(result, Err(Error::OutOfOrder { .. })));
        assert_eq!(writer.state(), WriterState::StatusWritten);

        drop(writer);
        assert_eq!(out.len(), written_so_far);
    }

    #[tokio::test]
    async fn test_status_line_only_once() {
        let mut out = Vec::new();
        let mut writer = ResponseWriter::new(&mut out);
        writer.write_status_line(StatusCode::OK).await.unwrap();
        let result = writer.write_status_line(StatusCode::NOT_FOUND).await;
        assert!(matches!(result, Err(Error::OutOfOrder { operation: "write_status_line", .. })));
    }

    #[tokio::test]
    async fn test_chunked_done_before_any_chunk_is_rejected() {
        let mut out = Vec::new();
        let mut writer = ResponseWriter::new(&mut out);
        writer.write_status_line(StatusCode::OK).await.unwrap();
        writer.write_headers(&chunked_headers()).await.unwrap();
        let before = writer.state();

        let result = writer.write_chunked_body_done().await;
        assert!(matches!(
            result,
            Err(Error::OutOfOrder { operation: "write_chunked_body_done", state: WriterState::HeadersWritten })
        ));
        assert_eq!(writer.state(), before);
    }

    #[tokio::test]
    async fn test_chunked_body_bytes() {
        let mut out = Vec::new();
        let mut writer = ResponseWriter::new(&mut out);

        writer.write_status_line(StatusCode::OK).await.unwrap();
        writer.write_headers(&Headers::new()).await.unwrap();
        writer.write_chunked_body(b"ab").await.unwrap();
        writer.write_chunked_body(b"cd").await.unwrap();
        writer.write_chunked_body_done().await.unwrap();

        let expected = b"HTTP/1.1 200 OK\r\n\r\n2\r\nab\r\n2\r\ncd\r\n0\r\n\r\n";
        assert_eq!(out, expected.to_vec());
    }

    #[tokio::test]
    async fn test_chunk_size_is_lowercase_hex() {
        let mut out = Vec::new();
        let mut writer = ResponseWriter::new(&mut out);
        writer.write_status_line(StatusCode::OK).await.unwrap();
        writer.write_headers(&Headers::new()).await.unwrap();
        writer.write_chunked_body(&[b'x'; 26]).await.unwrap();

        let response = String::from_utf8(out).unwrap();
        assert!(response.ends_with(&format!("\r\n\r\n1a\r\n{}\r\n", "x".repeat(26))));
    }

    #[tokio::test]
    async fn test_chunked_body_with_trailers() {
        let mut out = Vec::new();
        let mut writer = ResponseWriter::new(&mut out);

        let mut headers = chunked_headers();
        headers.set("trailer", "X-Content-Length");

        let mut trailers = Headers::new();
        trailers.set("X-Content-Length", "5");

        writer.write_status_line(StatusCode::OK).await.unwrap();
        writer.write_headers(&headers).await.unwrap();
        writer.write_chunked_body(b"hello").await.unwrap();
        writer.write_chunked_body_done().await.unwrap();
        writer.write_trailers(&trailers).await.unwrap();
        writer.write_trailers_done().await.unwrap();
        assert_eq!(writer.state(), WriterState::TrailersDone);

        let response = String::from_utf8(out).unwrap();
        assert!(response.contains("transfer-encoding: chunked\r\n"));
        assert!(!response.contains("content-length"));
        assert!(response.ends_with("5\r\nhello\r\n0\r\n\r\nx-content-length: 5\r\n\r\n"));
    }

    #[tokio::test]
    async fn test_trailers_require_terminating_chunk() {
        let mut out = Vec::new();
        let mut writer = ResponseWriter::new(&mut out);
        writer.write_status_line(StatusCode::OK).await.unwrap();
        writer.write_headers(&chunked_headers()).await.unwrap();
        writer.write_chunked_body(b"data").await.unwrap();

        let result = writer.write_trailers(&Headers::new()).await;
        assert!(matches!(result, Err(Error::OutOfOrder { operation: "write_trailers", .. })));

        let result = writer.write_trailers_done().await;
        assert!(matches!(result, Err(Error::OutOfOrder { operation: "write_trailers_done", .. })));
    }

    #[tokio::test]
    async fn test_plain_and_chunked_bodies_do_not_mix() {
        let mut out = Vec::new();
        let mut writer = ResponseWriter::new(&mut out);
        writer.write_status_line(StatusCode::OK).await.unwrap();
        writer.write_headers(&default_headers(4)).await.unwrap();
        writer.write_body(b"data").await.unwrap();

        let result = writer.write_chunked_body(b"more").await;
        assert!(matches!(result, Err(Error::OutOfOrder { state: WriterState::BodyWritten, .. })));
    }

    #[tokio::test]
    async fn test_failed_write_does_not_advance_state() {
        let mut sink = BrokenPipe;
        let mut writer = ResponseWriter::new(&mut sink);

        let result = writer.write_status_line(StatusCode::OK).await;
        assert!(matches!(result, Err(Error::IoError(ref e)) if e.kind() == io::ErrorKind::BrokenPipe));
        assert_eq!(writer.state(), WriterState::Init);
    }
}
