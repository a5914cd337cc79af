mod instrumentation;

use {
    crate::AlloyProvider,
    alloy::{
        network::EthereumWallet,
        providers::{Provider, ProviderBuilder},
        rpc::client::{ClientBuilder, RpcClient},
        signers::local::PrivateKeySigner,
    },
    anyhow::{Context, Result},
    instrumentation::InstrumentationLayer,
    url::Url,
};

const LABEL: &str = "main";

fn client(url: &Url) -> RpcClient {
    ClientBuilder::default()
        .layer(InstrumentationLayer {
            label: LABEL.into(),
        })
        .http(url.clone())
}

/// Provider without a local signer. Transactions sent through it must name
/// a `from` account the node has unlocked.
pub fn provider(url: &Url) -> AlloyProvider {
    ProviderBuilder::new().connect_client(client(url)).erased()
}

/// Provider that signs transactions locally with the given key and fills
/// nonce, gas and chain id before sending them.
pub fn provider_with_signer(url: &Url, signer: PrivateKeySigner) -> AlloyProvider {
    let wallet = EthereumWallet::new(signer);
    ProviderBuilder::new()
        .wallet(wallet)
        .connect_client(client(url))
        .erased()
}

/// Parses a hex encoded private key (with or without `0x` prefix).
pub fn signer(private_key: &str) -> Result<PrivateKeySigner> {
    private_key
        .trim()
        .parse()
        .context("invalid private key")
}
