use clap::Parser;
use esto_client::Client;
use esto_client::bench::{
    self, BenchmarkConfig, DEFAULT_ENTITY_ID, DEFAULT_ENTITY_TYPE, DEFAULT_EVENT_NAME,
    DEFAULT_REQUEST_COUNT,
};
use esto_types::{EntityId, EntityType, EventName};
use tracing_subscriber::EnvFilter;

/// Time a batch of sequential writes against an Esto service
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the service
    #[arg(short, long, env = "ESTO_ENDPOINT", default_value = "http://localhost:50051")]
    endpoint: String,

    /// Number of writes to issue
    #[arg(short = 'n', long, default_value_t = DEFAULT_REQUEST_COUNT)]
    count: usize,

    /// Entity every write targets
    #[arg(long, default_value_t = DEFAULT_ENTITY_ID)]
    entity_id: EntityId,

    /// Entity type of every write
    #[arg(long, default_value = DEFAULT_ENTITY_TYPE)]
    entity_type: String,

    /// Event name of every write
    #[arg(long, default_value = DEFAULT_EVENT_NAME)]
    event_name: String,

    /// JSON payload of every write
    #[arg(long, default_value = r#"{"a": 1, "b": 2}"#)]
    event_data: String,

    /// Read the entity back afterwards and report how many events it holds
    #[arg(long)]
    read_back: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // The report goes to stdout, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = BenchmarkConfig {
        count: cli.count,
        entity_id: cli.entity_id,
        entity_type: EntityType::try_new(cli.entity_type)?,
        event_name: EventName::try_new(cli.event_name)?,
        event_data: serde_json::from_str(&cli.event_data)?,
        read_back: cli.read_back,
    };

    let client = Client::connect(&cli.endpoint)?;
    let report = bench::run(&client, &config).await?;

    println!("{report}");
    if let Some(events) = report.events_read {
        println!("events read: {events}");
    }

    Ok(())
}
