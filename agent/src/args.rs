use std::net::SocketAddr;

use clap::Parser;

/// A small agent that answers questions about one candidate profile.
#[derive(Debug, Parser)]
#[command(name = "agent", version)]
pub struct Args {
    /// Listen address override; defaults to 0.0.0.0 on the configured PORT.
    #[arg(long, short('l'))]
    pub listen_address: Option<SocketAddr>,

    /// Log filter, e.g. "info" or "server=debug,llm=debug".
    #[arg(long, env = "AGENT_LOG", default_value = "info")]
    pub log_filter: String,
}
