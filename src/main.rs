use clap::Parser;
use echo_agent::a2a::capability::EchoCapability;
use echo_agent::a2a::executor::AgentExecutor;
use echo_agent::a2a::server;
use echo_agent::config::{GatewayArgs, GatewayConfig};
use echo_agent::logging;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "echo-agent", version, about = "A2A echo agent gateway")]
struct Cli {
    #[command(flatten)]
    gateway: GatewayArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.gateway.log_format)?;

    let config = GatewayConfig::from(cli.gateway);
    tracing::debug!("Loaded configuration: {:?}", config);

    let executor = AgentExecutor::new(Arc::new(EchoCapability));
    server::start_server(&config, executor).await
}
