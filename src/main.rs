mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    // Findings are printed to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    cli::CommandLineInterface::load().run()
}
