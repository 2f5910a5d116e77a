pub mod routes;
pub mod state;

use std::{net::SocketAddr, path::PathBuf};

use clap::{
	Parser,
	builder::{
		Styles,
		styling::{AnsiColor, Effects},
	},
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

pub const VERSION: &str = concat!(
	env!("CARGO_PKG_VERSION"),
	"-",
	env!("VERGEN_GIT_SHA"),
	"-",
	env!("VERGEN_CARGO_TARGET_TRIPLE"),
);

#[derive(Debug, Parser)]
#[command(
	version = VERSION,
	rename_all = "kebab",
	styles = styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = tailor_config::load(&args.config)?;

	init_tracing(&config);

	let http_addr: SocketAddr = config.service.http_bind.parse()?;
	let state = AppState::new(config).await?;
	let app = routes::router(state);
	let listener = TcpListener::bind(http_addr).await?;

	tracing::info!(%http_addr, version = VERSION, "HTTP server listening.");

	axum::serve(listener, app).await?;

	Ok(())
}

pub fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Red.on_default() | Effects::BOLD)
		.usage(AnsiColor::Red.on_default() | Effects::BOLD)
		.literal(AnsiColor::Blue.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Green.on_default())
}

fn init_tracing(config: &tailor_config::Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}
