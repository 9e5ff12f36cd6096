// CLI module for vertex-llm
// Author: kelexine (https://github.com/kelexine)

use clap::Parser;

/// vertex-llm - JSON prompt endpoint backed by Vertex AI Gemini
#[derive(Parser, Debug, Default)]
#[command(name = "vertex-llm", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.vertex-llm/config.toml)
    #[arg(long, env = "VERTEX_LLM_CONFIG")]
    pub config: Option<String>,

    /// Address to bind the HTTP server to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,

    /// Log output format: json or pretty
    #[arg(long, value_parser = ["json", "pretty"])]
    pub log_format: Option<String>,
}
