use clap::Parser;

use gerd_coach_lib::{run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let output = run(Cli::parse()).await?;
    println!("{output}");
    Ok(())
}
