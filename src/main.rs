use anyhow::Result;

use edmv::{app, cli};

fn main() -> Result<()> {
    let args = cli::parse();
    app::run(args)
}
