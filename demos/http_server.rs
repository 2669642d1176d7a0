//! Demo server showing route logic built on the wirehttp-rs handler contract.
//!
//! Run with `RUST_LOG=debug cargo run --example http_server` and try:
//!
//! - `curl -v localhost:42069/`
//! - `curl -v localhost:42069/yourproblem`
//! - `curl -v localhost:42069/myproblem`
//! - `curl -v --raw localhost:42069/chunked`
//! - `curl -v localhost:42069/inspect -d '{"hello": "world"}'`

use log::info;
use wirehttp_rs::response::{chunked_headers, default_headers};
use wirehttp_rs::{
    serve, HandlerError, HandlerFuture, Headers, Request, ResponseWriter, ServerError, StatusCode,
};

const PORT: u16 = 42069;

const BAD_REQUEST_HTML: &str = "<html>
  <head>
    <title>400 Bad Request</title>
  </head>
  <body>
    <h1>Bad Request</h1>
    <p>Your request honestly kinda sucked.</p>
  </body>
</html>";

const SERVER_ERROR_HTML: &str = "<html>
  <head>
    <title>500 Internal Server Error</title>
  </head>
  <body>
    <h1>Internal Server Error</h1>
    <p>Okay, you know what? This one is on me.</p>
  </body>
</html>";

const SUCCESS_HTML: &str = "<html>
  <head>
    <title>200 OK</title>
  </head>
  <body>
    <h1>Success!</h1>
    <p>Your request was an absolute banger.</p>
  </body>
</html>";

const CHUNKS: [&str; 3] = [
    "<html>\n  <head>\n    <title>Chunked Response</title>\n  </head>\n  <body>\n",
    "    <h1>Get Chunk'd!</h1>\n    <p>This content is being sent in chunks!</p>\n",
    "    <p>Each chunk gets a hex size prefix.</p>\n  </body>\n</html>",
];

async fn write_html(
    w: &mut ResponseWriter<'_>,
    status: StatusCode,
    html: &str,
) -> Result<(), HandlerError> {
    let mut headers = default_headers(html.len());
    headers.replace("content-type", "text/html");

    w.write_status_line(status).await?;
    w.write_headers(&headers).await?;
    w.write_body(html.as_bytes()).await?;
    Ok(())
}

async fn write_chunked(w: &mut ResponseWriter<'_>) -> Result<(), HandlerError> {
    let mut headers = chunked_headers();
    headers.replace("content-type", "text/html");
    headers.set("trailer", "X-Content-Length");

    w.write_status_line(StatusCode::OK).await?;
    w.write_headers(&headers).await?;

    let mut total = 0;
    for chunk in CHUNKS {
        total += w.write_chunked_body(chunk.as_bytes()).await?;
    }
    w.write_chunked_body_done().await?;

    let mut trailers = Headers::new();
    trailers.replace("x-content-length", total.to_string());
    w.write_trailers(&trailers).await?;
    w.write_trailers_done().await?;
    w.flush().await?;
    Ok(())
}

async fn write_inspection(w: &mut ResponseWriter<'_>, req: &Request) -> Result<(), HandlerError> {
    let json = serde_json::to_vec_pretty(req)
        .map_err(|e| HandlerError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let mut headers = default_headers(json.len());
    headers.replace("content-type", "application/json");

    w.write_status_line(StatusCode::OK).await?;
    w.write_headers(&headers).await?;
    w.write_body(&json).await?;
    Ok(())
}

async fn routes(w: &mut ResponseWriter<'_>, req: &Request) -> Result<(), HandlerError> {
    match req.request_line.request_target.as_str() {
        "/yourproblem" => write_html(w, StatusCode::BAD_REQUEST, BAD_REQUEST_HTML).await,
        "/myproblem" => write_html(w, StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_HTML).await,
        "/chunked" => write_chunked(w).await,
        "/inspect" => write_inspection(w, req).await,
        "/teapot" => Err(HandlerError::new(StatusCode(418), "I'm a teapot\n")),
        _ => write_html(w, StatusCode::OK, SUCCESS_HTML).await,
    }
}

fn handler<'a>(w: &'a mut ResponseWriter<'_>, req: &'a Request) -> HandlerFuture<'a> {
    Box::pin(routes(w, req))
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut server = serve(PORT, handler).await?;
    info!("Server started on port {PORT}");

    tokio::signal::ctrl_c().await?;
    server.close().await?;
    info!("Server gracefully stopped");
    Ok(())
}
