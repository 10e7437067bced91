use std::{
    ffi::OsString,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use litesvm::LiteSVM;
use moonshot_smoke::{
    Cluster, ConnectionContext, Connector, ProviderConfig, RpcTransport, TransportError,
};
use solana_sdk::{
    account::Account,
    hash::Hash,
    pubkey::Pubkey,
    signature::{write_keypair_file, Keypair, Signature, Signer},
    transaction::Transaction,
};

/// moonshot program ID (matches declare_id! in lib.rs)
pub const MOONSHOT_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("GbguYRqMUzErdhvxLL2dNGqi8wLzWnkp87wd7MnCqkZ3");

/// A keypair written to a temp file, removed on drop
pub struct TempWallet {
    pub keypair: Keypair,
    pub path: PathBuf,
}

impl TempWallet {
    pub fn new() -> Self {
        let keypair = Keypair::new();
        let path = std::env::temp_dir()
            .join(format!("moonshot-wallet-{}.json", keypair.pubkey()));
        write_keypair_file(&keypair, &path).expect("Failed to write wallet keypair");
        Self { keypair, path }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    pub fn config(&self) -> ProviderConfig {
        ProviderConfig::new(Cluster::Localnet, &self.path)
    }
}

impl Drop for TempWallet {
    fn drop(&mut self) {
        std::fs::remove_file(&self.path).ok();
    }
}

/// A wallet path that does not exist
pub fn missing_wallet_config() -> ProviderConfig {
    let path = std::env::temp_dir()
        .join(format!("moonshot-missing-{}.json", Pubkey::new_unique()));
    ProviderConfig::new(Cluster::Localnet, path)
}

/// Account of a deployed (upgradeable loader) program
pub fn executable_account() -> Account {
    Account {
        lamports: 1_141_440,
        data: vec![],
        owner: solana_sdk::bpf_loader_upgradeable::ID,
        executable: true,
        rent_epoch: 0,
    }
}

/// Account that exists but holds data, not code
pub fn data_account() -> Account {
    Account {
        lamports: 1_000_000,
        data: vec![0u8; 64],
        owner: anchor_lang::system_program::ID,
        executable: false,
        rent_epoch: 0,
    }
}

// ============================================================================
// LiteSVM
// ============================================================================

/// Environment variable pointing at a built moonshot program binary
pub const MOONSHOT_SO_ENV: &str = "MOONSHOT_SO";

/// Find the moonshot program .so file
pub fn find_program_file() -> PathBuf {
    program_file_from(std::env::var_os(MOONSHOT_SO_ENV))
}

/// An explicit path wins over the conventional deploy locations
pub fn program_file_from(explicit: Option<OsString>) -> PathBuf {
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }

    [
        "../../target/deploy/moonshot.so",
        "target/deploy/moonshot.so",
        "../target/deploy/moonshot.so",
    ]
    .into_iter()
    .map(PathBuf::from)
    .find(|path| path.exists())
    .unwrap_or_else(|| PathBuf::from("../../target/deploy/moonshot.so"))
}

/// Initialize LiteSVM without any program loaded
pub fn setup_litesvm() -> LiteSVM {
    LiteSVM::new()
}

/// Initialize LiteSVM with the moonshot program
pub fn setup_litesvm_with_program() -> LiteSVM {
    let mut svm = LiteSVM::new();
    let program_path = find_program_file();
    svm.add_program_from_file(MOONSHOT_PROGRAM_ID, program_path.to_str().unwrap())
        .unwrap_or_else(|err| {
            panic!(
                "Failed to load moonshot program from {}: {err:?}. Set {MOONSHOT_SO_ENV}.",
                program_path.display()
            )
        });
    svm
}

/// LiteSVM behind the client's transport seam
#[derive(Clone)]
pub struct LiteSvmTransport {
    svm: Arc<Mutex<LiteSVM>>,
}

impl LiteSvmTransport {
    pub fn new(svm: LiteSVM) -> Self {
        Self {
            svm: Arc::new(Mutex::new(svm)),
        }
    }

    pub fn airdrop(&self, address: &Pubkey, lamports: u64) {
        self.svm
            .lock()
            .unwrap()
            .airdrop(address, lamports)
            .expect("Airdrop failed");
    }

    pub fn set_account(&self, address: Pubkey, account: Account) {
        self.svm
            .lock()
            .unwrap()
            .set_account(address, account)
            .expect("Failed to set account");
    }

    pub fn balance(&self, address: &Pubkey) -> u64 {
        self.svm
            .lock()
            .unwrap()
            .get_account(address)
            .map_or(0, |account| account.lamports)
    }

    /// Fresh blockhash so an identical transaction is not deduplicated
    pub fn expire_blockhash(&self) {
        self.svm.lock().unwrap().expire_blockhash();
    }
}

#[async_trait]
impl RpcTransport for LiteSvmTransport {
    async fn latest_blockhash(&self) -> Result<Hash, TransportError> {
        Ok(self.svm.lock().unwrap().latest_blockhash())
    }

    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, TransportError> {
        Ok(self.svm.lock().unwrap().get_account(address))
    }

    async fn send_and_confirm(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, TransportError> {
        let result = self.svm.lock().unwrap().send_transaction(transaction.clone());
        match result {
            Ok(meta) => Ok(meta.signature),
            Err(failed) => {
                println!("logs: {:#?}", failed.meta.logs);
                Err(TransportError::Transaction(failed.err))
            }
        }
    }
}

impl Connector for LiteSvmTransport {
    type Transport = LiteSvmTransport;

    fn connect(&self, _context: &ConnectionContext) -> LiteSvmTransport {
        self.clone()
    }
}
