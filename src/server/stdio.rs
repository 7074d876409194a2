use crate::server::protocol::{parse_error_response, McpServer};
use crate::utils::error::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Reads newline-delimited JSON-RPC messages until EOF, writing one response
/// line per request. Messages are handled in order. A line that is not UTF-8
/// gets a parse error like any other malformed message.
pub async fn serve<R, W>(server: &McpServer, mut reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) => server.handle_line(line).await,
            Err(e) => {
                tracing::warn!("Discarding message that is not UTF-8: {}", e);
                Some(parse_error_response(e))
            }
        };

        if let Some(response) = response {
            writer.write_all(response.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }
    Ok(())
}

pub async fn run_stdio(server: &McpServer) -> Result<()> {
    tracing::info!("Serving MCP on stdio");
    let stdin = BufReader::new(tokio::io::stdin());
    serve(server, stdin, tokio::io::stdout()).await?;
    tracing::info!("stdin closed, shutting down");
    Ok(())
}
