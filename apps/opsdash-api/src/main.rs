use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = opsdash_api::Args::parse();

	opsdash_api::run(args).await
}
