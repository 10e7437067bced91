//! Provider configuration.
//!
//! A [`ProviderConfig`] is the explicit input of a smoke run: which cluster
//! to talk to, which keypair signs, and how long to wait for confirmation.
//! It is built from CLI flags, the `ANCHOR_PROVIDER_URL` / `ANCHOR_WALLET`
//! environment, or the `[provider]` section of an `Anchor.toml`, in that
//! order of precedence.

use std::{
    collections::BTreeMap,
    env, fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;
use solana_sdk::commitment_config::CommitmentConfig;

use crate::{constants::*, errors::ConfigError};

/// Target cluster of a run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cluster {
    #[default]
    Localnet,
    Devnet,
    Testnet,
    Mainnet,
    Custom(String),
}

impl Cluster {
    /// JSON-RPC endpoint
    pub fn url(&self) -> &str {
        match self {
            Cluster::Localnet => LOCALNET_URL,
            Cluster::Devnet => DEVNET_URL,
            Cluster::Testnet => TESTNET_URL,
            Cluster::Mainnet => MAINNET_URL,
            Cluster::Custom(url) => url.as_str(),
        }
    }

    /// Key of the `[programs.<cluster>]` table that applies to this cluster.
    /// Custom endpoints on the local machine count as localnet.
    pub fn registry_key(&self) -> &str {
        match self {
            Cluster::Localnet => "localnet",
            Cluster::Devnet => "devnet",
            Cluster::Testnet => "testnet",
            Cluster::Mainnet => "mainnet",
            Cluster::Custom(url) if is_local_url(url) => "localnet",
            Cluster::Custom(_) => "custom",
        }
    }
}

fn is_local_url(url: &str) -> bool {
    let authority = url
        .split_once("://")
        .map_or(url, |(_, rest)| rest)
        .split('/')
        .next()
        .unwrap_or_default();
    // IPv6 hosts are bracketed: [::1]:8899
    let host = match authority.strip_prefix('[') {
        Some(bracketed) => bracketed.split(']').next(),
        None => authority.split(':').next(),
    }
    .unwrap_or_default();
    matches!(host, "localhost" | "127.0.0.1" | "0.0.0.0" | "::1")
}

impl FromStr for Cluster {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "localnet" | "localhost" | "l" => Ok(Cluster::Localnet),
            "devnet" | "d" => Ok(Cluster::Devnet),
            "testnet" | "t" => Ok(Cluster::Testnet),
            "mainnet" | "mainnet-beta" | "m" => Ok(Cluster::Mainnet),
            lower if lower.starts_with("http://") || lower.starts_with("https://") => {
                Ok(Cluster::Custom(trimmed.to_string()))
            }
            _ => Err(ConfigError::InvalidCluster(s.to_string())),
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cluster::Custom(url) => f.write_str(url),
            named => f.write_str(named.registry_key()),
        }
    }
}

/// Parse a commitment level name
pub fn parse_commitment(s: &str) -> Result<CommitmentConfig, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "processed" => Ok(CommitmentConfig::processed()),
        "confirmed" => Ok(CommitmentConfig::confirmed()),
        "finalized" => Ok(CommitmentConfig::finalized()),
        _ => Err(ConfigError::InvalidCommitment(s.to_string())),
    }
}

/// Expand a leading `~/` against `$HOME`
pub fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(path),
    }
}

fn default_wallet() -> PathBuf {
    expand_home(&format!("~/{DEFAULT_WALLET_PATH}"))
}

/// Network endpoint, signer location and commitment of a run
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub cluster: Cluster,
    pub wallet: PathBuf,
    pub commitment: CommitmentConfig,
}

impl ProviderConfig {
    pub fn new(cluster: Cluster, wallet: impl Into<PathBuf>) -> Self {
        Self {
            cluster,
            wallet: wallet.into(),
            commitment: CommitmentConfig::confirmed(),
        }
    }

    pub fn with_commitment(mut self, commitment: CommitmentConfig) -> Self {
        self.commitment = commitment;
        self
    }

    /// Read the provider from the environment the way Anchor's test runner
    /// exports it. The wallet is required; the URL defaults to localnet.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = env::var(ANCHOR_PROVIDER_URL_ENV).ok();
        let wallet = env::var(ANCHOR_WALLET_ENV)
            .map_err(|_| ConfigError::MissingEnv(ANCHOR_WALLET_ENV))?;
        Self::layered(url.as_deref(), Some(&wallet), None)
    }

    /// Merge explicit values over an optional `[provider]` section, falling
    /// back to localnet and the Solana CLI keypair.
    pub fn layered(
        url: Option<&str>,
        wallet: Option<&str>,
        provider: Option<&ProviderSection>,
    ) -> Result<Self, ConfigError> {
        let cluster = match url.or(provider.map(|p| p.cluster.as_str())) {
            Some(cluster) => cluster.parse()?,
            None => Cluster::default(),
        };
        let wallet = match wallet.or(provider.map(|p| p.wallet.as_str())) {
            Some(wallet) => expand_home(wallet),
            None => default_wallet(),
        };
        Ok(Self::new(cluster, wallet))
    }
}

/// `[provider]` section of an `Anchor.toml`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ProviderSection {
    pub cluster: String,
    pub wallet: String,
}

/// Program entry of a `[programs.<cluster>]` table; either a bare address
/// or a table with an `address` key.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ProgramEntry {
    Address(String),
    Detailed { address: String },
}

impl ProgramEntry {
    pub fn address(&self) -> &str {
        match self {
            ProgramEntry::Address(address) | ProgramEntry::Detailed { address } => address,
        }
    }
}

/// The parts of an Anchor workspace manifest the client reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnchorToml {
    #[serde(default)]
    pub provider: Option<ProviderSection>,
    #[serde(default)]
    pub programs: BTreeMap<String, BTreeMap<String, ProgramEntry>>,
}

impl AnchorToml {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        content.parse()
    }

    /// Load `Anchor.toml` from a directory if one exists there
    pub fn discover(dir: impl AsRef<Path>) -> Result<Option<Self>, ConfigError> {
        let path = dir.as_ref().join(ANCHOR_TOML);
        if path.exists() {
            Self::load(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Programs registered for a cluster
    pub fn programs_for(&self, cluster: &Cluster) -> Option<&BTreeMap<String, ProgramEntry>> {
        self.programs.get(cluster.registry_key())
    }
}

impl FromStr for AnchorToml {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}
