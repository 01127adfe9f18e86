//! Relay provider chunks into the HTTP response body.

use axum::body::Bytes;
use futures::{stream, Stream, StreamExt};
use tracing::Span;

use stencil::{DomainError, TextStream};

/// Written after the last chunk of a generation that completed cleanly
pub const FINISHED_MARKER: &str = "\n\nFinished";

#[derive(Default)]
struct RelayState {
    chunks: usize,
    bytes: usize,
    done: bool,
}

/// Forward each chunk unmodified, then append [`FINISHED_MARKER`].
///
/// A provider error is yielded as-is and ends the relay without the marker.
/// The body owns `chunks`, so dropping the response drops the upstream call.
/// Completion is logged inside `span`.
pub fn relay(
    chunks: TextStream,
    span: Span,
) -> impl Stream<Item = Result<Bytes, DomainError>> + Send {
    stream::unfold(
        (chunks, RelayState::default()),
        move |(mut chunks, mut state)| {
            let span = span.clone();
            async move {
                if state.done {
                    return None;
                }

                let next = chunks.next().await;
                let _entered = span.enter();
                let item = match next {
                    Some(Ok(text)) => {
                        state.chunks += 1;
                        state.bytes += text.len();
                        Ok(Bytes::from(text))
                    }
                    Some(Err(err)) => {
                        tracing::error!(
                            chunks = state.chunks,
                            bytes = state.bytes,
                            "Generation failed mid-stream: {}",
                            err
                        );
                        state.done = true;
                        Err(err)
                    }
                    None => {
                        tracing::info!(
                            chunks = state.chunks,
                            bytes = state.bytes,
                            "Generation finished"
                        );
                        state.done = true;
                        Ok(Bytes::from_static(FINISHED_MARKER.as_bytes()))
                    }
                };
                Some((item, (chunks, state)))
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_stream(items: Vec<Result<&'static str, DomainError>>) -> TextStream {
        stream::iter(items.into_iter().map(|r| r.map(str::to_string))).boxed()
    }

    #[tokio::test]
    async fn test_chunks_then_marker() {
        let chunks = text_stream(vec![Ok("<p>"), Ok("{{price}}"), Ok("</p>")]);
        let out: Vec<_> = relay(chunks, Span::none()).collect().await;
        let bytes: Vec<u8> = out
            .into_iter()
            .flat_map(|b| b.unwrap().to_vec())
            .collect();
        assert_eq!(bytes, b"<p>{{price}}</p>\n\nFinished");
    }

    #[tokio::test]
    async fn test_empty_generation_still_finishes() {
        let out: Vec<_> = relay(text_stream(vec![]), Span::none()).collect().await;
        assert_eq!(out, vec![Ok(Bytes::from_static(b"\n\nFinished"))]);
    }

    #[tokio::test]
    async fn test_error_ends_without_marker() {
        let chunks = text_stream(vec![
            Ok("<p>"),
            Err(DomainError::external("reset")),
            Ok("never"),
        ]);
        let out: Vec<_> = relay(chunks, Span::none()).collect().await;
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], Ok(Bytes::from_static(b"<p>")));
        assert!(out[1].is_err());
    }
}
