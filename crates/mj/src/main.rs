use anyhow::Context;
use clap::Parser;
use mj_core::{Config, HttpGateway, Relay};
use mj_events::EventStore;
use mj_serve::AppState;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CONFIG_PATH: &str = "./config.json";

/// Relay between the dashboard and the Mailjet REST API.
#[derive(Parser)]
#[command(name = "mj")]
struct Cli {
    /// Port to listen on.
    #[arg(default_value_t = DEFAULT_PORT)]
    port: u16,
    /// Address to bind.
    #[arg(default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    addr: IpAddr,
    /// Path to the JSON configuration file.
    #[arg(default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Print the OpenAPI document and exit.
    #[arg(long)]
    openapi: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.openapi {
        println!("{}", mj_serve::openapi::generate_spec());
        return Ok(());
    }

    init_tracing();

    let config = Config::load(&cli.config)?;
    info!(
        path = %cli.config.display(),
        base_url = %config.base_url,
        max_events = config.max_events(),
        "config loaded"
    );

    let store = EventStore::open(&config.data_dir, config.max_events())
        .await
        .context("failed to open event store")?;
    let gateway = HttpGateway::new(config.upstream_timeout())?;
    let state = AppState::new(Relay::new(Arc::new(config), store, gateway));

    let addr = SocketAddr::new(cli.addr, cli.port);
    mj_serve::serve(state, addr)
        .await
        .with_context(|| format!("server on {addr} failed"))
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,mj=debug,mj_core=debug,mj_events=debug,mj_serve=debug,tower_http=debug")
    });
    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
