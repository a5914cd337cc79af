use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let mut stderr = std::io::stderr();
    let args = match deploy_contracts::parse_arguments(std::env::args_os(), &mut stderr) {
        Ok(args) => args,
        Err(outcome) => return outcome.into(),
    };
    observe::tracing::initialize(&args.logging.observe_config());
    tracing::info!("running deployer with validated arguments:\n{}", args);
    deploy_contracts::start(args, &mut std::io::stdout(), &mut stderr)
        .await
        .into()
}
