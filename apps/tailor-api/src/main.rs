use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = tailor_api::Args::parse();
	tailor_api::run(args).await
}
