use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};
use tracing::warn;

/// What came back from one listening turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Utterance {
    Text(String),
    /// Nothing intelligible was heard; the caller may still be there.
    Silence,
    /// The caller is gone.
    Hangup,
}

impl Utterance {
    pub fn text(&self) -> Option<&str> {
        match self {
            Utterance::Text(text) if !text.trim().is_empty() => Some(text.trim()),
            _ => None,
        }
    }
}

/// Speech in and out. Recognition and synthesis live behind this.
#[async_trait]
pub trait SpeechIo: Send {
    async fn speak(&mut self, text: &str);

    async fn listen(&mut self) -> Utterance;
}

/// Reads lines from stdin and prints replies to stdout.
pub struct ConsoleSpeech {
    input: Lines<BufReader<Stdin>>,
    output: Stdout,
}

impl ConsoleSpeech {
    pub fn new() -> Self {
        Self {
            input: BufReader::new(tokio::io::stdin()).lines(),
            output: tokio::io::stdout(),
        }
    }

    async fn write(&mut self, line: &str) {
        if let Err(e) = self.output.write_all(line.as_bytes()).await {
            warn!("Speech output error: {}", e);
        }
        let _ = self.output.flush().await;
    }
}

impl Default for ConsoleSpeech {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechIo for ConsoleSpeech {
    async fn speak(&mut self, text: &str) {
        self.write(&format!("Agent: {}\n", text)).await;
    }

    async fn listen(&mut self) -> Utterance {
        self.write("You: ").await;

        match self.input.next_line().await {
            Ok(Some(line)) if line.trim().is_empty() => Utterance::Silence,
            Ok(Some(line)) => Utterance::Text(line),
            Ok(None) => Utterance::Hangup,
            Err(e) => {
                warn!("Listening error: {}", e);
                Utterance::Silence
            }
        }
    }
}
