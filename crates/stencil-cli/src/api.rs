//! Stencil API Client

use anyhow::{bail, Context, Result};
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Trailer the server writes after a complete generation
const FINISHED_MARKER: &[u8] = b"\n\nFinished";

/// API Client for Stencil
pub struct StencilClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Result of a streamed generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// Template bytes written (marker excluded)
    pub bytes: usize,
    /// Whether the server confirmed completion
    pub finished: bool,
    /// Transport error that cut the body short
    pub interrupted: Option<String>,
}

impl StencilClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/health", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        if !resp.status().is_success() {
            bail!("Health check failed ({})", resp.status());
        }

        resp.json().await.context("Failed to parse health response")
    }

    /// Stream a generated template into `out` as it arrives
    pub async fn generate(
        &self,
        prompt: &str,
        system: Option<&str>,
        out: &mut dyn Write,
    ) -> Result<GenerationOutcome> {
        let url = format!("{}/api/generate", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&GenerateRequest { prompt, system })
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error)
                .unwrap_or(text);
            bail!("Generation failed ({}): {}", status, message);
        }

        let mut filter = MarkerFilter::new(FINISHED_MARKER);
        let mut written = 0;
        let mut body = resp.bytes_stream();
        let mut interrupted = None;

        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                // Server aborted mid-generation; keep what already arrived
                Err(err) => {
                    interrupted = Some(err.without_url().to_string());
                    break;
                }
            };
            let ready = filter.push(&chunk);
            out.write_all(&ready)?;
            out.flush()?;
            written += ready.len();
        }

        let (rest, finished) = filter.finish();
        out.write_all(&rest)?;
        out.flush()?;
        written += rest.len();

        Ok(GenerationOutcome {
            bytes: written,
            finished,
            interrupted,
        })
    }
}

/// Holds back the last `marker.len()` bytes so the trailer is never printed.
struct MarkerFilter<'a> {
    marker: &'a [u8],
    held: Vec<u8>,
}

impl<'a> MarkerFilter<'a> {
    fn new(marker: &'a [u8]) -> Self {
        Self {
            marker,
            held: Vec::with_capacity(marker.len() * 2),
        }
    }

    /// Bytes that can no longer be part of the trailer
    fn push(&mut self, bytes: &[u8]) -> Vec<u8> {
        self.held.extend_from_slice(bytes);
        let keep = self.marker.len().min(self.held.len());
        let ready = self.held.len() - keep;
        self.held.drain(..ready).collect()
    }

    /// Remaining output and whether it ended with the trailer
    fn finish(self) -> (Vec<u8>, bool) {
        if self.held == self.marker {
            (Vec::new(), true)
        } else {
            (self.held, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    fn run(chunks: &[&str]) -> (String, bool) {
        let mut filter = MarkerFilter::new(FINISHED_MARKER);
        let mut out = Vec::new();
        for chunk in chunks {
            out.extend(filter.push(chunk.as_bytes()));
        }
        let (rest, finished) = filter.finish();
        out.extend(rest);
        (String::from_utf8(out).unwrap(), finished)
    }

    #[test]
    fn test_marker_is_stripped() {
        assert_eq!(
            run(&["<p>", "{{price}}</p>", "\n\nFinished"]),
            ("<p>{{price}}</p>".to_string(), true)
        );
    }

    #[test]
    fn test_marker_split_across_chunks() {
        assert_eq!(
            run(&["<p></p>\n", "\nFin", "ished"]),
            ("<p></p>".to_string(), true)
        );
    }

    #[test]
    fn test_truncated_stream_keeps_everything() {
        assert_eq!(
            run(&["<div>", "\n\nFin"]),
            ("<div>\n\nFin".to_string(), false)
        );
    }

    #[test]
    fn test_output_is_released_before_the_end() {
        let mut filter = MarkerFilter::new(FINISHED_MARKER);
        let ready = filter.push(b"<html><body>long enough to release</body>");
        assert!(!ready.is_empty());
    }

    /// Serve one connection with a raw HTTP response; returns the base URL.
    ///
    /// When `complete` is false the socket closes before the terminating
    /// chunk, so the client sees a truncated chunked body.
    async fn serve_once(
        status: &'static str,
        chunks: &'static [&'static str],
        complete: bool,
    ) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;

            let mut response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/event-stream\r\nTransfer-Encoding: chunked\r\n\r\n",
                status
            );
            for chunk in chunks {
                response.push_str(&format!("{:x}\r\n{}\r\n", chunk.len(), chunk));
            }
            if complete {
                response.push_str("0\r\n\r\n");
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.flush().await.unwrap();
        });

        format!("http://{}", addr)
    }

    /// Read headers plus a `Content-Length` body
    async fn read_request(socket: &mut TcpStream) {
        let mut received = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            received.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&received).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if received.len() >= end + 4 + length || n == 0 {
                    return;
                }
            } else if n == 0 {
                return;
            }
        }
    }

    #[tokio::test]
    async fn test_generate_writes_template_and_detects_marker() {
        let url = serve_once("200 OK", &["<p>{{price}}", "</p>", "\n\nFinished"], true).await;
        let mut out = Vec::new();

        let outcome = StencilClient::new(&url)
            .generate("receipt", None, &mut out)
            .await
            .unwrap();

        assert_eq!(out, b"<p>{{price}}</p>");
        assert_eq!(
            outcome,
            GenerationOutcome {
                bytes: 16,
                finished: true,
                interrupted: None,
            }
        );
    }

    #[tokio::test]
    async fn test_generate_reports_interrupted_stream() {
        let url = serve_once("200 OK", &["<div>{{order_id}}"], false).await;
        let mut out = Vec::new();

        let outcome = StencilClient::new(&url)
            .generate("receipt", None, &mut out)
            .await
            .unwrap();

        assert_eq!(out, b"<div>{{order_id}}");
        assert!(!outcome.finished);
        let message = outcome.interrupted.expect("transport error is reported");
        assert!(!message.contains(&url));
    }

    #[tokio::test]
    async fn test_generate_surfaces_server_error_message() {
        let url = serve_once("400 Bad Request", &[r#"{"error":"Missing prompt"}"#], true).await;
        let mut out = Vec::new();

        let err = StencilClient::new(&url)
            .generate("", None, &mut out)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Missing prompt"));
        assert!(out.is_empty());
    }
}
