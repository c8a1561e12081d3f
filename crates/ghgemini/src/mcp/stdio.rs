use crate::prelude::*;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use super::ServerState;

pub async fn run_stdio(state: ServerState) -> Result<()> {
    info!("Starting MCP server with stdio transport");

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    serve(stdin, stdout, &state).await
}

/// Answer one JSON-RPC request per line until EOF. Lines are read as bytes, so
/// a line that is not UTF-8 gets a parse error instead of ending the loop.
async fn serve<R, W>(mut reader: R, mut writer: W, state: &ServerState) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = Vec::new();

    loop {
        line.clear();
        let bytes_read = reader.read_until(b'\n', &mut line).await?;

        if bytes_read == 0 {
            break; // EOF
        }

        let trimmed = line.trim_ascii();
        if trimmed.is_empty() {
            continue;
        }

        debug!("Received: {}", String::from_utf8_lossy(trimmed));

        let response = super::handle_request(trimmed, state).await;
        let response_json = serde_json::to_string(&response)?;

        debug!("Sending: {response_json}");

        writer.write_all(response_json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    Ok(())
}
