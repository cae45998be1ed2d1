use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Ollama Args ---
    /// Base URL of the Ollama runtime (e.g., http://localhost:11434)
    #[arg(long, env = "OLLAMA_HOST", default_value = "http://localhost:11434")]
    pub ollama_host: String,

    /// Model used when a chat request does not name one (e.g., llama3.2:1b, mistral)
    #[arg(long, env = "OLLAMA_MODEL", default_value = "llama3.2:1b")]
    pub model: String,

    // --- API Server Args ---
    /// Host address for the HTTP API to listen on.
    #[arg(long, env = "API_HOST", default_value = "0.0.0.0")]
    pub api_host: String,

    /// Port for the HTTP API to listen on.
    #[arg(long, env = "API_PORT", default_value = "8000")]
    pub api_port: u16,

    // --- Generation Args ---
    /// Default maximum number of tokens to generate (sent to Ollama as num_predict).
    /// Not range checked; Ollama decides what it accepts (-1 means no limit).
    #[arg(long, env = "MAX_TOKENS", default_value = "2048", allow_negative_numbers = true)]
    pub max_tokens: i64,

    /// Default sampling temperature, conventionally 0.0 to 2.0.
    #[arg(long, env = "TEMPERATURE", default_value = "0.7", allow_negative_numbers = true)]
    pub temperature: f32,
}

/// Generation parameters applied when the caller leaves them out.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationDefaults {
    pub model: String,
    pub max_tokens: i64,
    pub temperature: f32,
}

impl Args {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    pub fn generation_defaults(&self) -> GenerationDefaults {
        GenerationDefaults {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}
