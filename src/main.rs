//! resp-codec: RESP encoder/decoder over stdin and stdout
//!
//! - `resp-codec encode`: each input line becomes a RESP command array
//! - `resp-codec decode`: RESP replies are decoded and printed one per line
//!
//! Configuration via CLI arguments or TOML file. Logs go to stderr.

use resp_codec::config::{Config, Mode};
use resp_codec::stream::{decode_stream, encode_lines};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!(
        mode = ?config.mode,
        chunk_size = config.chunk_size,
        max_depth = config.max_depth,
        "Starting resp-codec"
    );

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    match config.mode {
        Mode::Encode => {
            let commands = encode_lines(stdin, stdout).await?;
            info!(commands, "Encoded commands");
        }
        Mode::Decode => {
            let summary = decode_stream(stdin, stdout, config.parser(), config.chunk_size).await?;
            info!(
                replies = summary.replies,
                errors = summary.errors,
                pending = summary.pending,
                "Decoded replies"
            );
        }
    }

    Ok(())
}
