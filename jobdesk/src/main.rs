use clap::Parser;
use jobdesk::cmd;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// path to config file
    #[arg(short, long, default_value_t = String::from("config.toml"))]
    config: String,

    #[command(subcommand)]
    cmd: cmd::Subcommand,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let res = args.cmd.run(&args.config).await;
    if let Err(err) = res.as_ref() {
        log::error!("Exit with error: {:#}", err)
    }

    res
}
