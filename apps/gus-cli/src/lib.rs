use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use color_eyre::eyre;
use tracing_subscriber::EnvFilter;

use gus_client::GithubClient;
use gus_controller::SearchController;

#[derive(Debug, Parser)]
#[command(version, rename_all = "kebab")]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: Option<PathBuf>,
	/// Login fragment to search for.
	pub query: String,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = match &args.config {
		Some(path) => gus_config::load(path)?,
		None => gus_config::Config::default(),
	};
	init_tracing(&config);

	if args.query.chars().count() < config.search.min_query_len {
		return Err(eyre::eyre!(
			"Query must be at least {} characters long.",
			config.search.min_query_len
		));
	}

	let client = GithubClient::new(&config.search)?;
	let controller = SearchController::new(&config.search, Arc::new(client));

	tracing::info!(api_base = %config.search.api_base, "Searching users.");

	controller.dispatch_now(&args.query).await;

	if let Some(message) = controller.error() {
		return Err(eyre::eyre!(message));
	}

	let results = controller.results();

	tracing::info!(count = results.len(), "Search completed.");

	for user in results {
		println!("{}\t{}\t{}", user.id, user.login, user.avatar_url);
	}

	Ok(())
}

fn init_tracing(config: &gus_config::Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_env_filter(filter).init();
}
