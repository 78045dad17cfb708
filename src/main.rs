use anyhow::Result;

mod app;

fn main() -> Result<()> {
    let args = nyzo_distribute::cli::parse();
    app::run(args)
}
