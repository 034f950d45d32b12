//! CLI argument definitions for the HTTP stub.

use clap::Args;

#[derive(Args, Clone, Debug)]
pub struct ApiArgs {
    /// Address to listen on
    #[arg(long, env = "MESSAGE_API_LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: String,
}
