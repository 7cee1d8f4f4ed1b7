use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    // Results go to stdout, so logs are kept on stderr.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rill_demos=info".into()),
        )
        .init();

    let demos = rill_demos::catalog();
    let mut out = std::io::stdout().lock();
    let failed = rill_demos::run_all(&demos, &mut out);

    if failed > 0 {
        tracing::error!(failed, total = demos.len(), "demonstrations failed");
        ExitCode::FAILURE
    } else {
        tracing::debug!(total = demos.len(), "all demonstrations complete");
        ExitCode::SUCCESS
    }
}
