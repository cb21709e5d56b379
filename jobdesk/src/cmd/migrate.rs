use clap::Parser;

use crate::config::Config;
use crate::db;

#[derive(Debug, Parser)]
pub enum DbCmd {
    #[command(about = "Apply migrations")]
    MigrateUp,
    #[command(about = "Prints migrations metadata")]
    ListMigrations,
}

impl DbCmd {
    pub async fn run(&self, cfg_path: &str) -> anyhow::Result<()> {
        match self {
            DbCmd::MigrateUp => migrate_up(cfg_path).await,
            DbCmd::ListMigrations => {
                println!("MIGRATIONS:");
                for m in db::get_migration_info() {
                    println!("-> {}\t{}", m.0, m.1)
                }
                Ok(())
            }
        }
    }
}

pub async fn migrate_up(cfg_path: &str) -> anyhow::Result<()> {
    let cfg = Config::read(cfg_path)?;
    db::apply_migrations(&cfg.db).await?;
    Ok(())
}
