use clap::Parser;
use dom_drift::cli::commands::{cmd_capture, cmd_compare, cmd_delete, cmd_diff, cmd_list, cmd_locators};
use dom_drift::cli::config::{Cli, Commands, load_config, resolve_log_level};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    // RUST_LOG > -v count > config
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(resolve_log_level(cli.verbose, &config)));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.log_json || config.log.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let store = cli.store.as_deref();

    match cli.command {
        Commands::Capture {
            name,
            html,
            url,
            parse,
            identity,
        } => {
            cmd_capture(&config, store, &name, &html, &url, parse.mode(), identity.as_deref())?;
        }
        Commands::List => cmd_list(&config, store)?,
        Commands::Delete { id } => cmd_delete(&config, store, &id)?,
        Commands::Compare {
            baseline,
            html,
            format,
            parse,
            identity,
            output,
        } => {
            cmd_compare(
                &config,
                store,
                &baseline,
                &html,
                format,
                parse.mode(),
                identity.as_deref(),
                output.as_deref(),
            )?;
        }
        Commands::Locators {
            html,
            key,
            parse,
            output,
        } => cmd_locators(&config, &html, key.as_deref(), parse.mode(), output.as_deref())?,
        Commands::Diff { baseline, html, output } => {
            cmd_diff(&config, store, &baseline, &html, output.as_deref())?
        }
    }

    Ok(())
}
