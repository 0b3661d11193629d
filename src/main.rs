#![doc = include_str!("../README.md")]
use ::lib::config::{merge_config, Args};
use ::lib::setup_tracing;
use ::lib::web::serve;
use anyhow::{Context, Result};
use tracing::debug;

#[paw::main]
fn main(args: Args) -> Result<()> {
    // Merge config Default → Config File → command line args
    let args = merge_config(args)?;
    setup_tracing(&args)?;
    debug!("Effective arguments {:#?}", args);
    let config = args.validate()?;

    // Requests are served cooperatively on a single thread, commands run on
    // the blocking pool.
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Starting async runtime")?
        .block_on(serve(config))
}
