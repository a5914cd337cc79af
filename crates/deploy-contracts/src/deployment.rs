//! The deployment flow: send the creation transaction, wait until it is
//! confirmed and report the address of the new contract.

use {
    alloy::primitives::{Address, TxHash},
    anyhow::{Context, Result},
    std::{io::Write, process::ExitCode},
};

/// Creation transaction that has been broadcast but not necessarily mined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeployment {
    pub contract: String,
    pub transaction_hash: TxHash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedDeployment {
    /// Address of the created contract.
    pub address: Address,
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
}

/// Something that can put a contract on chain.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DeploymentProvider: Send + Sync {
    /// Broadcasts the creation transaction of the named contract.
    async fn deploy_contract(&self, name: &str) -> Result<PendingDeployment>;

    /// Resolves once the deployment reached the required confirmation depth.
    async fn wait_for_deployment(&self, pending: PendingDeployment)
    -> Result<ConfirmedDeployment>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded(Address),
    Failed,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Succeeded(_) => 0,
            Self::Failed => 1,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.exit_code())
    }
}

/// Deploys the contract and waits for the confirmation. Every step happens
/// exactly once, failures are returned as is.
pub async fn deploy(provider: &dyn DeploymentProvider, name: &str) -> Result<ConfirmedDeployment> {
    let pending = provider
        .deploy_contract(name)
        .await
        .with_context(|| format!("failed to deploy {name}"))?;
    tracing::info!(
        contract = %pending.contract,
        tx_hash = ?pending.transaction_hash,
        "sent deployment transaction"
    );

    let confirmed = provider
        .wait_for_deployment(pending)
        .await
        .with_context(|| format!("failed to confirm deployment of {name}"))?;
    tracing::info!(
        address = %confirmed.address,
        tx_hash = ?confirmed.transaction_hash,
        block = ?confirmed.block_number,
        "deployment confirmed"
    );
    Ok(confirmed)
}

/// Runs the deployment and reports the result.
///
/// On success a single `<name> <address>` line is written to `stdout`. On
/// failure `stdout` stays untouched and the error with its causes is written
/// to `stderr`.
pub async fn run(
    provider: &dyn DeploymentProvider,
    name: &str,
    stdout: &mut impl Write,
    stderr: &mut impl Write,
) -> Outcome {
    let result = async {
        let deployment = deploy(provider, name).await?;
        writeln!(stdout, "{} {}", label(name), deployment.address)
            .context("failed to report deployed address")?;
        Ok::<_, anyhow::Error>(deployment.address)
    }
    .await;

    match result {
        Ok(address) => Outcome::Succeeded(address),
        Err(err) => report_failure(stderr, &err),
    }
}

/// Writes the error to `stderr` and turns it into a failed outcome.
///
/// A failed write to `stderr` is ignored. The returned outcome still maps to
/// a failure exit code.
pub fn report_failure(stderr: &mut impl Write, err: &anyhow::Error) -> Outcome {
    tracing::debug!(?err, "deployment failed");
    let _ = writeln!(stderr, "{err:?}");
    Outcome::Failed
}

/// Contract name without the source path of a fully qualified name.
fn label(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, contract)| contract)
}
