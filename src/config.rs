use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "jobfeed", about = "Job feed aggregation service")]
pub struct Config {
    /// Listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// Lever board slugs to aggregate
    #[arg(
        long,
        env = "LEVER_BOARDS",
        value_delimiter = ',',
        default_value = "vercel,datadog,plaid,doordash"
    )]
    pub lever_boards: Vec<String>,

    /// Greenhouse board slugs to aggregate
    #[arg(
        long,
        env = "GREENHOUSE_BOARDS",
        value_delimiter = ',',
        default_value = "stripe,openai,snowflake"
    )]
    pub greenhouse_boards: Vec<String>,

    /// Per-source fetch timeout in seconds
    #[arg(long, env = "FETCH_TIMEOUT_SECS", default_value = "12")]
    pub fetch_timeout_secs: u64,
}
