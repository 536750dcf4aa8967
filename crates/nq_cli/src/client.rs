use std::io::Write;

use anyhow::{anyhow, bail, Context};
use nq_core::sse::SseParser;
use nq_core::StreamMessage;
use reqwest::StatusCode;
use url::Url;

/// Asks a running server and prints the answer as it streams in.
pub async fn ask(server: &str, question: &str) -> anyhow::Result<()> {
    let mut url = Url::parse(server)
        .and_then(|base| base.join("ask"))
        .with_context(|| format!("Invalid server URL: {}", server))?;
    url.query_pairs_mut().append_pair("q", question);

    let response = reqwest::get(url).await?;
    if response.status() == StatusCode::BAD_REQUEST {
        let body: serde_json::Value = response.json().await?;
        let message = body["error"].as_str().unwrap_or("Failed to get answer");
        bail!("{}", message);
    }
    let mut response = response.error_for_status()?;

    let mut parser = SseParser::new();
    let mut stdout = std::io::stdout();
    while let Some(chunk) = response.chunk().await? {
        for message in parser.push(&chunk) {
            match message {
                StreamMessage::Chunk { content } => {
                    write!(stdout, "{}", content)?;
                    stdout.flush()?;
                }
                StreamMessage::Done => {
                    writeln!(stdout)?;
                    return Ok(());
                }
                StreamMessage::Error { message } => return Err(anyhow!(message)),
            }
        }
    }

    Err(anyhow!("Stream ended before the answer was complete"))
}
