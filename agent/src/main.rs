use anyhow::Context;
use args::Args;
use clap::Parser;
use server::ServeConfig;

mod args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    server::logger::init(&args.log_filter);

    // Strict credential policy: a missing or malformed environment refuses
    // to boot rather than failing on the first request.
    let config = config::Config::from_env().context("failed to load configuration")?;

    let listen_address = args.listen_address.unwrap_or(config.server.listen_address);

    log::info!("starting profile agent on {listen_address}");

    server::serve(ServeConfig { listen_address, config })
        .await
        .context("server exited with an error")?;

    Ok(())
}
