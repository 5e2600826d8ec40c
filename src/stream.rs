//! Async adapters between byte streams and the RESP codec.
//!
//! `decode_stream` plays the transport role for a [`Parser`]: it reads
//! chunks in order, feeds them to the parser and renders every decoded value
//! as one text line. Failures are rendered as `(error) <message>` lines and
//! the loop keeps going, the same way a connection survives a bad reply.
//!
//! `encode_lines` turns each input line into a RESP command array.

use crate::resp::{encode_line, DecodeError, Parser, ParserConfig, Value};
use std::io;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, trace, warn};

/// Counters for one `decode_stream` run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreamSummary {
    /// Non-empty reads from the input.
    pub chunks: usize,
    /// Values delivered by the parser.
    pub replies: usize,
    /// Decode failures, error replies included.
    pub errors: usize,
    /// Bytes still buffered when the input ended.
    pub pending: usize,
}

/// Decode RESP values from `reader`, writing one rendered line per value.
pub async fn decode_stream<R, W>(
    mut reader: R,
    mut writer: W,
    config: ParserConfig,
    chunk_size: usize,
) -> io::Result<StreamSummary>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut parser = Parser::with_config(config, move |value| {
        // rx outlives the parser, so the send cannot fail
        let _ = tx.send(value);
    });
    let mut chunk = vec![0u8; chunk_size.max(1)];
    let mut summary = StreamSummary::default();

    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        summary.chunks += 1;
        trace!(bytes = n, "read chunk");

        if let Err(e) = parser.parse(&chunk[..n]) {
            write_replies(&mut rx, &mut writer, &mut summary).await?;
            write_error(&e, &mut writer, &mut summary).await?;
        }

        // one chunk may carry several replies
        loop {
            match parser.parse_buffered() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    write_replies(&mut rx, &mut writer, &mut summary).await?;
                    write_error(&e, &mut writer, &mut summary).await?;
                }
            }
        }
        write_replies(&mut rx, &mut writer, &mut summary).await?;
    }

    if !parser.is_empty() {
        summary.pending = parser.buffered_len();
        warn!(pending = summary.pending, "input ended inside an incomplete value");
    }
    writer.flush().await?;

    debug!(
        chunks = summary.chunks,
        replies = summary.replies,
        errors = summary.errors,
        "decode finished"
    );
    Ok(summary)
}

/// Encode every non-empty line of `reader` as a RESP command.
///
/// Returns the number of commands written.
pub async fn encode_lines<R, W>(reader: R, mut writer: W) -> io::Result<usize>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    let mut commands = 0;

    while let Some(line) = lines.next_line().await? {
        if line.is_empty() {
            continue;
        }
        writer.write_all(&encode_line(&line)).await?;
        commands += 1;
    }
    writer.flush().await?;

    debug!(commands, "encode finished");
    Ok(commands)
}

async fn write_replies<W>(
    rx: &mut UnboundedReceiver<Value>,
    writer: &mut W,
    summary: &mut StreamSummary,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Ok(value) = rx.try_recv() {
        summary.replies += 1;
        writer.write_all(format!("{value}\n").as_bytes()).await?;
    }
    Ok(())
}

async fn write_error<W>(
    error: &DecodeError,
    writer: &mut W,
    summary: &mut StreamSummary,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    summary.errors += 1;
    match error {
        DecodeError::Remote(_) => debug!(error = %error, "error reply"),
        _ => warn!(error = %error, "protocol error, parser reset"),
    }
    writer
        .write_all(format!("(error) {error}\n").as_bytes())
        .await
}
