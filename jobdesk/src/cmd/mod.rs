use anyhow::Context;
use api_core::server::run_server;
use clap::Parser;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::db;
use crate::rest::api::Service;

pub mod api_keys;
pub mod migrate;

#[derive(Debug, Parser)]
pub enum Subcommand {
    #[command(about = "Start API server")]
    ApiServer,

    #[command(about = "Prints default config structure")]
    ExampleConfig,

    #[command(subcommand, about = "Manage API Keys")]
    ApiKey(api_keys::ManageApiKeys),

    #[command(subcommand, about = "Manage the DB")]
    Db(migrate::DbCmd),
}

impl Subcommand {
    pub async fn run(&self, cfg_path: &str) -> anyhow::Result<()> {
        match self {
            Subcommand::ApiServer => run_api_server(cfg_path).await,
            Subcommand::ApiKey(cmd) => cmd.run(cfg_path).await,
            Subcommand::Db(cmd) => cmd.run(cfg_path).await,
            Subcommand::ExampleConfig => {
                let cfg = Config::default();
                let output = toml::to_string_pretty(&cfg)?;
                println!("{output}");
                Ok(())
            }
        }
    }
}

pub async fn run_api_server(cfg_path: &str) -> anyhow::Result<()> {
    let cfg = Config::read(cfg_path).context("unable to read config file")?;
    if cfg.db.automigrate {
        db::apply_migrations(&cfg.db).await?;
    }

    log::info!("Init api service");
    let api_service = Service::new(cfg.clone()).await?;
    let cancel = CancellationToken::new();

    log::info!("Run HTTP server");
    match run_server(cfg.api, cancel.clone(), api_service).await {
        Ok(_) => (),
        Err(err) => {
            error!("HTTP server failed: {:?}", err);
        }
    }
    cancel.cancel();

    log::info!("Application successfully shut down");

    Ok(())
}
