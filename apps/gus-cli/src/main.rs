use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = gus_cli::Args::parse();
	gus_cli::run(args).await
}
