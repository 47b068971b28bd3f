use clap::Parser;
use product_lookup_bot::runner::{fail, serve};
use product_lookup_bot::utils::{logger, validation::Validate};
use product_lookup_bot::{CliConfig, LinkBot, LocalStorage};

/// Keyword-to-URL variant: answers each message with the matching line of the links file.
#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting link bot");

    let result = async {
        let settings = cli.resolve()?;
        settings.validate()?;

        let storage = LocalStorage::new(&settings.bot.files.data_dir);
        tracing::info!(
            "📁 Answering from {}",
            storage.base_path().join(&settings.bot.files.links_file).display()
        );
        let bot = LinkBot::new(storage, &settings.bot);
        serve(&settings, bot).await
    }
    .await;

    if let Err(e) = result {
        fail(&e);
    }

    tracing::info!("✅ Bot stopped");
}
