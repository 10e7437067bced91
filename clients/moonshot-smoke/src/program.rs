use std::{collections::BTreeMap, fmt};

use anchor_lang::AccountDeserialize;
use solana_sdk::{pubkey::Pubkey, signature::Signature, signer::Signer, transaction::Transaction};
use tracing::{debug, warn};

use crate::{
    config::{AnchorToml, Cluster},
    constants::MOONSHOT_PROGRAM_NAME,
    context::ConnectionContext,
    errors::{ConfigError, RemoteCallError, ResolutionError},
    instructions::{build_initialize_ix, derive_event_authority},
    state::{Global, GlobalSettingsInput},
    transport::RpcTransport,
};

/// Confirmed signature of a remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionResult {
    signature: Signature,
}

impl TransactionResult {
    pub fn new(signature: Signature) -> Self {
        Self { signature }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}

impl fmt::Display for TransactionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // base58
        write!(f, "{}", self.signature)
    }
}

/// Program names and the addresses they are deployed at on one cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramRegistry {
    programs: BTreeMap<String, Pubkey>,
}

impl Default for ProgramRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(MOONSHOT_PROGRAM_NAME, crate::ID);
        registry
    }
}

impl ProgramRegistry {
    pub fn empty() -> Self {
        Self {
            programs: BTreeMap::new(),
        }
    }

    /// Defaults overridden by the `[programs.<cluster>]` table of a manifest
    pub fn from_anchor_toml(manifest: &AnchorToml, cluster: &Cluster) -> Result<Self, ConfigError> {
        let mut registry = Self::default();
        let Some(programs) = manifest.programs_for(cluster) else {
            return Ok(registry);
        };
        for (name, entry) in programs {
            let address = entry.address().parse::<Pubkey>().map_err(|_| {
                ConfigError::InvalidProgramAddress {
                    name: name.clone(),
                    address: entry.address().to_string(),
                }
            })?;
            registry.register(name, address);
        }
        Ok(registry)
    }

    pub fn register(&mut self, name: impl Into<String>, address: Pubkey) -> Option<Pubkey> {
        self.programs.insert(name.into(), address)
    }

    pub fn lookup(&self, name: &str) -> Option<Pubkey> {
        self.programs.get(name).copied()
    }

    /// Bind the program registered under `name` to a context, after checking
    /// that an executable account lives at its address.
    pub async fn resolve<'a, T: RpcTransport>(
        &self,
        name: &str,
        context: &'a ConnectionContext,
        transport: &'a T,
    ) -> Result<MoonshotProgram<'a, T>, ResolutionError> {
        let address = self
            .lookup(name)
            .ok_or_else(|| ResolutionError::NotRegistered(name.to_string()))?;

        let account = transport
            .get_account(&address)
            .await
            .map_err(|source| ResolutionError::Lookup { address, source })?
            .ok_or(ResolutionError::NotDeployed(address))?;
        if !account.executable {
            return Err(ResolutionError::NotExecutable(address));
        }
        if address != crate::ID {
            warn!(%address, declared = %crate::ID, "program deployed at a non-declared address");
        }

        debug!(program = name, %address, "program resolved");
        Ok(MoonshotProgram::new(address, context, transport))
    }
}

/// Typed handle to a deployed moonshot program
pub struct MoonshotProgram<'a, T> {
    id: Pubkey,
    context: &'a ConnectionContext,
    transport: &'a T,
}

impl<'a, T: RpcTransport> MoonshotProgram<'a, T> {
    /// Bind without checking the deployment; see [`ProgramRegistry::resolve`]
    pub fn new(id: Pubkey, context: &'a ConnectionContext, transport: &'a T) -> Self {
        Self {
            id,
            context,
            transport,
        }
    }

    pub fn id(&self) -> Pubkey {
        self.id
    }

    pub fn global_address(&self) -> Pubkey {
        Global::address(&self.id).0
    }

    pub fn event_authority(&self) -> Pubkey {
        derive_event_authority(&self.id)
    }

    /// Initialize the global settings with the launch defaults
    pub async fn initialize(&self) -> Result<TransactionResult, RemoteCallError> {
        self.initialize_with(GlobalSettingsInput::default()).await
    }

    /// Initialize the global settings; the payer becomes both global and
    /// migration authority.
    pub async fn initialize_with(
        &self,
        params: GlobalSettingsInput,
    ) -> Result<TransactionResult, RemoteCallError> {
        let payer = self.context.payer();
        let ix = build_initialize_ix(&self.id, &payer.pubkey(), params);

        let blockhash = self.transport.latest_blockhash().await?;
        let transaction =
            Transaction::new_signed_with_payer(&[ix], Some(&payer.pubkey()), &[payer], blockhash);

        debug!(program = %self.id, global = %self.global_address(), "initialize");
        let signature = self.transport.send_and_confirm(&transaction).await?;
        Ok(TransactionResult::new(signature))
    }

    /// Fetch and decode the global settings account, `None` before initialize
    pub async fn fetch_global(&self) -> Result<Option<Global>, RemoteCallError> {
        let address = self.global_address();
        let Some(account) = self.transport.get_account(&address).await? else {
            return Ok(None);
        };
        let global = Global::try_deserialize(&mut account.data.as_slice()).map_err(|err| {
            RemoteCallError::Decode {
                address,
                reason: err.to_string(),
            }
        })?;
        Ok(Some(global))
    }
}
