use solana_sdk::{
    commitment_config::CommitmentConfig,
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signer},
};
use tracing::debug;

use crate::{
    config::{Cluster, ProviderConfig},
    errors::ConfigError,
};

/// Endpoint and signing identity of a run. Built once, never mutated.
#[derive(Debug)]
pub struct ConnectionContext {
    cluster: Cluster,
    payer: Keypair,
    commitment: CommitmentConfig,
}

impl ConnectionContext {
    pub fn new(cluster: Cluster, payer: Keypair, commitment: CommitmentConfig) -> Self {
        Self {
            cluster,
            payer,
            commitment,
        }
    }

    /// Load the wallet named by the configuration
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ConfigError> {
        let payer = read_keypair_file(&config.wallet).map_err(|err| ConfigError::Wallet {
            path: config.wallet.clone(),
            reason: err.to_string(),
        })?;
        debug!(
            cluster = %config.cluster,
            payer = %payer.pubkey(),
            commitment = ?config.commitment.commitment,
            "connection context ready"
        );
        Ok(Self::new(config.cluster.clone(), payer, config.commitment))
    }

    pub fn cluster(&self) -> &Cluster {
        &self.cluster
    }

    pub fn payer(&self) -> &Keypair {
        &self.payer
    }

    pub fn payer_pubkey(&self) -> Pubkey {
        self.payer.pubkey()
    }

    pub fn commitment(&self) -> CommitmentConfig {
        self.commitment
    }
}
