use anyhow::Result;
use nblaunch::cli::App;

fn main() -> Result<()> {
    let args = nblaunch::cli::Args::parse_args();
    let mut app = App::from_args(&args)?;

    app.run(args)?;

    Ok(())
}
