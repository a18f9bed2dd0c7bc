mod actions;
mod app;
mod cli;
mod component;
mod config;
mod libs;
mod page;
mod tui;
mod utils;

use app::{App, RootState};
use clap::Parser;
use color_eyre::eyre::{Context, Result};
use dotenv::dotenv;

#[cfg(not(tarpaulin_include))]
async fn run(args: cli::Cli, config: config::Config) -> Result<()> {
    let print_json = config.picker.print_json;
    let state = RootState::new(config);
    let mut app = App::new(
        state,
        tui::Tui::new()?
            .tick_rate(args.tick_rate)
            .frame_rate(args.frame_rate)
            .paste(true)
            .into(),
    );

    app.run().await?;

    // the terminal draws on stderr, stdout is left for the result
    if print_json {
        if let Some(selection) = &app.state.last_selection {
            println!(
                "{}",
                serde_json::to_string(selection).context("Error serializing selection")?
            );
        }
    }
    Ok(())
}

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<()> {
    dotenv().ok();
    utils::errors::init()?;

    let args = cli::Cli::parse();
    let config = config::Config::new(Some(cli::ClapSource::new(&args)))
        .context("Error when loading config")?;
    utils::logging::init(&config.config.data_dir)?;

    run(args, config).await
}
