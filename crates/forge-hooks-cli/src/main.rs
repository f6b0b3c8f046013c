use forge_hooks_cli::run_cli;
use tracing::error;

fn main() {
    if let Err(e) = run_cli() {
        error!(error = %e, exit_code = e.exit_code(), "Command failed");
        eprintln!("forge-hooks: {e}");
        std::process::exit(e.exit_code());
    }
}
