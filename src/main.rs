//! tidytuesday command-line entry point.

use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {e}");
            std::process::exit(1);
        }
    };

    let mut out = std::io::stdout().lock();
    let mut err = std::io::stderr();
    let code = runtime.block_on(tidytuesday::cli::run(std::env::args(), &mut out, &mut err));
    drop(out);
    std::process::exit(code);
}
