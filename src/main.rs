use std::path::PathBuf;

use clap::Parser;

use hbnb_console::cli::Console;

/// Interactive console for the persisted object set.
#[derive(Parser)]
#[command(name = "hbnb_console", version, about)]
struct Args {
    /// JSON document backing the object store
    #[arg(long, default_value = "file.json")]
    file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut console = Console::new(&args.file)?;
    console.run();
    Ok(())
}
