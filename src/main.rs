use clap::Parser;
use product_lookup_bot::runner::{fail, serve};
use product_lookup_bot::utils::{logger, validation::Validate};
use product_lookup_bot::{CliConfig, LocalStorage, ProductBot};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting product lookup bot");

    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => fail(&e),
    };
    if cli.verbose {
        tracing::debug!("Settings: {:?}", settings);
    }

    if let Err(e) = settings.validate() {
        fail(&e);
    }

    let storage = LocalStorage::new(&settings.bot.files.data_dir);
    tracing::info!(
        "📁 Answering from {}",
        storage.base_path().join(&settings.bot.files.product_file).display()
    );
    let bot = ProductBot::new(storage, &settings.bot);

    if let Err(e) = serve(&settings, bot).await {
        fail(&e);
    }

    tracing::info!("✅ Bot stopped");
}
