use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use async_image::application::{ImagePipeline, LoaderRegistry, UiContext};
use async_image::domain::ports::{HttpFetchPort, ResponseCachePort};
use async_image::domain::ImageKey;
use async_image::infrastructure::{
    AppConfig, CachingFetcher, CliArgs, ConfigLoader, ReqwestFetcher, open_response_store,
};
use async_image::presentation::Gallery;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<(AppConfig, ConfigLoader)> {
    let loader = match &args.config {
        Some(path) => ConfigLoader::with_path(path.clone()),
        None => ConfigLoader::new()?,
    };
    let mut config = loader
        .load()
        .wrap_err_with(|| format!("reading {}", loader.config_path().display()))?;
    config.merge_with_args(args);
    Ok((config, loader))
}

async fn build_pipeline(config: &AppConfig) -> Result<ImagePipeline> {
    let fetcher: Arc<dyn HttpFetchPort> = Arc::new(ReqwestFetcher::new(&config.http)?);

    let store = match open_response_store(&config.cache).await {
        Ok(store) => store,
        Err(e) => {
            warn!(error = %e, "Response cache unavailable, continuing without it");
            None
        }
    };

    let pipeline = match store {
        Some(store) => {
            let lookup: Arc<dyn ResponseCachePort> = store.clone();
            ImagePipeline::new(Arc::new(CachingFetcher::new(fetcher, store)))
                .with_response_cache(lookup)
        }
        None => ImagePipeline::new(fetcher),
    };

    Ok(pipeline)
}

fn print_frame(title: &str, lines: &[String]) {
    println!("{title}");
    for line in lines {
        println!("  {line}");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let (config, config_loader) = load_config(&args)?;
    init_logging(&config)?;

    if config_loader.file_exists() {
        debug!(path = %config_loader.config_path().display(), "Loaded config file");
    } else {
        info!(
            path = %config_loader.config_path().display(),
            "Config file not found, using defaults"
        );
    }

    info!(version = async_image::VERSION, cache = %config.cache.mode, "Starting {}", async_image::NAME);

    let keys = args
        .urls
        .iter()
        .map(|url| ImageKey::parse(url))
        .collect::<Result<Vec<_>, _>>()?;

    let registry = LoaderRegistry::new(build_pipeline(&config).await?);
    let ui = UiContext::new();
    let mut gallery = Gallery::new(keys, &registry, &config.display.placeholder);

    print_frame("initial", &gallery.frame());

    gallery.appear(&ui);
    let shown = gallery
        .settle(&ui, Duration::from_secs(config.display.wait_secs))
        .await;

    print_frame("loaded", &gallery.frame());
    info!(shown, loaders = registry.len(), "Done");

    Ok(())
}
