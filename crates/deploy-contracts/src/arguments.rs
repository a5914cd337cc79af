use {
    std::{path::PathBuf, time::Duration},
    url::Url,
};

#[derive(clap::Parser)]
pub struct LoggingArguments {
    #[clap(
        long,
        env,
        default_value = "warn,deploy_contracts=info,contracts=info,ethrpc=info"
    )]
    pub log_filter: String,

    /// Emit log events as JSON.
    #[clap(long, env)]
    pub log_json: bool,
}

impl LoggingArguments {
    pub fn observe_config(&self) -> observe::Config {
        observe::Config::new(&self.log_filter, self.log_json)
    }
}

impl std::fmt::Display for LoggingArguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self {
            log_filter,
            log_json,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_json: {log_json}")?;
        Ok(())
    }
}

#[derive(clap::Parser)]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    /// The contract to deploy. Either the plain contract name or the fully
    /// qualified `<source>:<name>` if the plain name is not unique.
    #[clap(long, env, default_value = "Meta")]
    pub contract: String,

    /// Comma separated constructor arguments in their human readable form.
    #[clap(long, env, use_value_delimiter = true)]
    pub constructor_args: Vec<String>,

    /// Directory containing the Hardhat compilation artifacts.
    #[clap(long, env, default_value = "artifacts")]
    pub artifacts: PathBuf,

    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Hex encoded private key of the deployer account. If omitted the
    /// first account the node has unlocked sends the transaction.
    #[clap(long, env)]
    pub private_key: Option<String>,

    /// Number of blocks the deployment needs to be buried under before it
    /// counts as confirmed.
    #[clap(long, env, default_value = "1")]
    pub confirmations: u64,

    /// Give up waiting for the confirmation after this long. Waits forever
    /// by default.
    #[clap(long, env, value_parser = humantime::parse_duration)]
    pub confirmation_timeout: Option<Duration>,
}

impl std::fmt::Display for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self {
            logging,
            contract,
            constructor_args,
            artifacts,
            node_url,
            private_key,
            confirmations,
            confirmation_timeout,
        } = self;

        write!(f, "{logging}")?;
        writeln!(f, "contract: {contract}")?;
        writeln!(f, "constructor_args: {constructor_args:?}")?;
        writeln!(f, "artifacts: {}", artifacts.display())?;
        writeln!(f, "node_url: {node_url}")?;
        writeln!(
            f,
            "private_key: {}",
            private_key.as_ref().map(|_| "SECRET").unwrap_or("None")
        )?;
        writeln!(f, "confirmations: {confirmations}")?;
        writeln!(f, "confirmation_timeout: {confirmation_timeout:?}")?;
        Ok(())
    }
}
