use anyhow::Result;
use clap::Parser;
use std::io::Write;
use streamscribe::{AudioBuffer, Config, StreamError, StreamingRecognizer, TranscriptSink};
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about = "Stream a recording to a speech recognition service")]
struct Cli {
    /// Path to the recording to transcribe
    audio: String,

    /// Configuration file (extension resolved by the loader)
    #[arg(long, default_value = "config/streamscribe")]
    config: String,

    /// Override the recognition endpoint from the config file
    #[arg(long)]
    endpoint: Option<String>,
}

/// Console presentation of recognition events: partials overwrite the current
/// line, finals commit it with every alternative listed.
struct ConsoleSink;

impl TranscriptSink for ConsoleSink {
    fn on_partial(&mut self, text: &str, _alternatives: &[String]) {
        print!("\r{}", text);
        std::io::stdout().flush().ok();
    }

    fn on_final(&mut self, text: &str, alternatives: &[String]) {
        println!("\r{}", text);
        for alternative in alternatives.iter().skip(1) {
            println!("  (or: {})", alternative);
        }
    }

    fn on_stream_end(&mut self) {
        info!("Transcription complete");
    }

    fn on_stream_error(&mut self, err: &StreamError) {
        error!("Transcription failed: {}", err);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    let mut session_config = cfg.session_config();
    if let Some(endpoint) = cli.endpoint {
        session_config.endpoint = endpoint;
    }

    info!("{} -> {}", cfg.service.name, session_config.endpoint);

    let audio = AudioBuffer::open(&cli.audio)?;
    let recognizer = StreamingRecognizer::new(session_config)?;

    let mut sink = ConsoleSink;
    recognizer.transcribe(audio, &mut sink).await?;

    Ok(())
}
