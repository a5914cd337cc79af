//! [`DeploymentProvider`] backed by an Ethereum node.

use {
    crate::{
        arguments::Arguments,
        deployment::{ConfirmedDeployment, DeploymentProvider, PendingDeployment},
    },
    alloy::{
        network::TransactionBuilder,
        primitives::Address,
        providers::{PendingTransactionBuilder, Provider},
        rpc::types::TransactionRequest,
    },
    anyhow::{Context, Result},
    contracts::ArtifactStore,
    ethrpc::AlloyProvider,
    std::time::Duration,
};

pub struct NodeDeployer {
    provider: AlloyProvider,
    artifacts: ArtifactStore,
    constructor_args: Vec<String>,
    /// Account sending the transaction when the node signs it. `None` if the
    /// provider signs locally.
    sender: Option<Address>,
    confirmations: u64,
    timeout: Option<Duration>,
}

impl NodeDeployer {
    pub fn new(provider: AlloyProvider, artifacts: ArtifactStore) -> Self {
        Self {
            provider,
            artifacts,
            constructor_args: Vec::new(),
            sender: None,
            confirmations: 1,
            timeout: None,
        }
    }

    /// Connects to the node and picks the deployer account.
    pub async fn from_arguments(args: &Arguments) -> Result<Self> {
        let deployer = match &args.private_key {
            Some(private_key) => {
                let signer = ethrpc::alloy::signer(private_key)?;
                tracing::info!(deployer = %signer.address(), "signing deployment locally");
                let provider = ethrpc::alloy::provider_with_signer(&args.node_url, signer);
                Self::new(provider, ArtifactStore::new(&args.artifacts))
            }
            None => {
                let provider = ethrpc::alloy::provider(&args.node_url);
                let sender = first_unlocked_account(&provider).await?;
                tracing::info!(deployer = %sender, "using unlocked node account");
                Self::new(provider, ArtifactStore::new(&args.artifacts)).with_sender(sender)
            }
        };

        Ok(deployer
            .with_constructor_args(args.constructor_args.clone())
            .with_confirmations(args.confirmations)
            .with_timeout(args.confirmation_timeout))
    }

    pub fn with_sender(mut self, sender: Address) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn with_constructor_args(mut self, constructor_args: Vec<String>) -> Self {
        self.constructor_args = constructor_args;
        self
    }

    pub fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait::async_trait]
impl DeploymentProvider for NodeDeployer {
    async fn deploy_contract(&self, name: &str) -> Result<PendingDeployment> {
        let artifact = self.artifacts.find(name)?;
        let code = artifact.deployment_code(&self.constructor_args)?;
        tracing::debug!(
            contract = %artifact.fully_qualified_name(),
            code_size = code.len(),
            "deploying contract"
        );

        let mut tx = TransactionRequest::default().with_deploy_code(code);
        if let Some(sender) = self.sender {
            tx.set_from(sender);
        }
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .context("failed to send deployment transaction")?;

        Ok(PendingDeployment {
            contract: artifact.contract_name,
            transaction_hash: *pending.tx_hash(),
        })
    }

    async fn wait_for_deployment(
        &self,
        pending: PendingDeployment,
    ) -> Result<ConfirmedDeployment> {
        let receipt =
            PendingTransactionBuilder::new(self.provider.root().clone(), pending.transaction_hash)
                .with_required_confirmations(self.confirmations)
                .with_timeout(self.timeout)
                .get_receipt()
                .await
                .context("failed to get deployment receipt")?;

        anyhow::ensure!(
            receipt.status(),
            "deployment transaction {:?} of {} reverted",
            receipt.transaction_hash,
            pending.contract
        );
        let address = receipt.contract_address.with_context(|| {
            format!(
                "receipt of {:?} has no contract address",
                receipt.transaction_hash
            )
        })?;

        Ok(ConfirmedDeployment {
            address,
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
        })
    }
}

/// The account local development nodes (Hardhat, Anvil) deploy from when no
/// key is configured.
pub async fn first_unlocked_account(provider: &AlloyProvider) -> Result<Address> {
    provider
        .get_accounts()
        .await
        .context("failed to fetch node accounts")?
        .first()
        .copied()
        .context("node has no unlocked accounts, configure a private key")
}
