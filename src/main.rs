use anyhow::Result;
use chatdock::cli;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let runtime_options = match cli::process_cli() {
        cli::CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            std::process::exit(code);
        }
        cli::CliResult::Continue(options) => options,
    };
    // CLI --log-level flag takes highest precedence, then RUST_LOG, then info.
    chatdock::debug::init_log_bridge(runtime_options.log_level);

    log::info!("Starting chatdock {}", chatdock::VERSION);

    let mut stdout = std::io::stdout().lock();
    let result = cli::commands::run(&runtime_options, &mut stdout);
    if let Err(ref e) = result {
        log::error!("Command failed: {e:#}");
        eprintln!("chatdock: error: {e:#}");
    }
    result
}
