//! Jeedom MCP bridge - Main Entry Point
//!
//! `run` keeps the snapshot fresh until Ctrl-C, `snapshot` prints what the
//! assistant would currently be told, and `invoke` performs one action.

use jeedom_mcp_rust::{
    logging::{init_logging, LogConfig},
    server::JeedomBridge,
    tools::{LightAction, ShutterAction},
    JeedomError, Result, ServerConfig,
};

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Jeedom MCP bridge configuration
#[derive(Parser, Debug)]
#[command(name = "jeedom-mcp-server")]
#[command(about = "Bridge between an assistant and a Jeedom home automation server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Jeedom base URL
    #[arg(long, global = true, env = "JEEDOM_URL")]
    url: Option<String>,

    /// Jeedom API key
    #[arg(long, global = true, env = "JEEDOM_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Refresh the device snapshot until interrupted
    Run,
    /// Run one cycle and print version, instructions and tool schemas
    Snapshot,
    /// Run one cycle, then perform an action
    Invoke {
        /// Device family to act on
        #[arg(value_enum)]
        tool: Tool,

        /// Verb, e.g. on/off for lights or open/close/stop for shutters
        action: String,

        /// Equipment ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Tool {
    Lights,
    Shutters,
}

impl Cli {
    fn load_config(&self) -> Result<ServerConfig> {
        let mut config = ServerConfig::load(self.config.as_deref())?;

        if let Some(url) = &self.url {
            config.jeedom.url = url
                .parse()
                .map_err(|e| JeedomError::config(format!("Invalid --url: {e}")))?;
        }
        if let Some(api_key) = &self.api_key {
            config.jeedom.api_key = api_key.as_str().into();
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.load_config()?;
    init_logging(LogConfig::from(&config.logging).with_debug(cli.debug))?;

    let bridge = JeedomBridge::from_config(&config)?;

    match cli.command {
        Command::Run => serve(bridge).await,
        Command::Snapshot => {
            bridge.refresh().await?;
            let snapshot = bridge.snapshot().await;
            let report = json!({
                "version": snapshot.version,
                "pluginPresent": snapshot.plugin_present,
                "instructions": snapshot.instructions,
                "tools": snapshot.tools,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Command::Invoke { tool, action, ids } => {
            bridge.refresh().await?;
            let answer = match tool {
                Tool::Lights => {
                    let action: LightAction = parse_action(&action)?;
                    bridge.update_lights(action, &ids).await
                }
                Tool::Shutters => {
                    let action: ShutterAction = parse_action(&action)?;
                    bridge.update_shutters(action, &ids).await
                }
            };
            bridge.dispatcher().drain().await;
            println!("{answer}");
            Ok(())
        }
    }
}

fn parse_action<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T> {
    serde_json::from_value(json!(raw.to_lowercase()))
        .map_err(|_| JeedomError::invalid_input(format!("unsupported action '{raw}'")))
}

async fn serve(bridge: JeedomBridge) -> Result<()> {
    let cancel = CancellationToken::new();
    let handle = bridge.scheduler().spawn(cancel.clone());

    info!("Jeedom bridge running, press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;
    info!("Shutting down");

    cancel.cancel();
    handle
        .await
        .map_err(|e| JeedomError::internal(format!("scheduler task failed: {e}")))?;
    bridge.dispatcher().drain().await;
    Ok(())
}
