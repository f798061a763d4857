use clap::Parser;
use log::LevelFilter;
use telphin_api::error::Result;
use telphin_api::{Adapter, Configuration, Logger};

/// Builds a client configuration from the environment and command line, then
/// prints what a client would run with.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Application key
    #[arg(long)]
    app_key: Option<String>,

    /// Application secret
    #[arg(long)]
    app_secret: Option<String>,

    /// API base url (e.g., https://pbx.telphin.ru/uapi)
    #[arg(long)]
    site: Option<String>,

    /// HTTP transport: reqwest, http1 or http2
    #[arg(long)]
    adapter: Option<Adapter>,

    /// Retry count for failed requests
    #[arg(long)]
    max_retries: Option<u32>,

    /// Route the client log through env_logger instead of stdout
    #[arg(short, long, action = clap::ArgAction::SetTrue, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Configuration::from_env()?;
    config.configure(|c| {
        if let Some(key) = args.app_key {
            c.app_key = Some(key);
        }
        if let Some(secret) = args.app_secret {
            c.app_secret = Some(secret);
        }
        if let Some(site) = args.site {
            c.site = site;
        }
        if let Some(adapter) = args.adapter {
            c.adapter = adapter;
        }
        if let Some(max_retries) = args.max_retries {
            c.max_retries = max_retries;
        }
        if args.verbose {
            env_logger::Builder::from_default_env()
                .filter_level(LevelFilter::Debug)
                .init();
            c.logger = Logger::facade().with_progname("telphin");
            c.log_responses = true;
        }
    });

    // Building the client performs no I/O; it only checks the options.
    let _client = config.http_client()?;

    config.logger.info(format!("site: {}", config.site));
    config.logger.info(format!("adapter: {}", config.adapter));
    config.logger.info(format!("max retries: {}", config.max_retries));
    config.logger.info(format!("logging: {:?}", config.logger_options()));
    match config.credentials() {
        Some((key, _)) => config.logger.info(format!("credentials for app key {}", key)),
        None => config.logger.warn("no credentials configured"),
    }

    Ok(())
}
