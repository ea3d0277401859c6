use std::net::SocketAddr;

use clap::Parser;
use esto_memory::InMemoryStorage;
use esto_server::ServerConfig;
use tracing_subscriber::EnvFilter;

/// Esto event store service
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(short, long, env = "ESTO_LISTEN", default_value_t = ServerConfig::default().listen_addr)]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig {
        listen_addr: cli.listen,
    };
    esto_server::run(config, InMemoryStorage::new()).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listen_address_defaults_to_server_config() {
        let cli = Cli::try_parse_from(["esto"]).unwrap();
        assert_eq!(cli.listen, ServerConfig::default().listen_addr);
    }

    #[test]
    fn listen_address_can_be_overridden() {
        let cli = Cli::try_parse_from(["esto", "--listen", "127.0.0.1:6000"]).unwrap();
        assert_eq!(cli.listen, "127.0.0.1:6000".parse::<SocketAddr>().unwrap());
    }
}
