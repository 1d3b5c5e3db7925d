//! kodegen_release - build, archive and publish a GitHub release.

use kodegen_release::cli;
use kodegen_release::cli::OutputManager;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    match cli::run().await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            // Never quiet for fatal errors
            let output = OutputManager::new(false);
            cli::report_failure(&output, &e);
            process::exit(1);
        }
    }
}
