/// Name the program is registered under in the workspace
pub const MOONSHOT_PROGRAM_NAME: &str = "moonshot";

/// Seed of the global settings PDA
pub const GLOBAL_SEED: &[u8] = b"global";

/// Seed of the Anchor event authority PDA (event-cpi)
pub const EVENT_AUTHORITY_SEED: &[u8] = b"__event_authority";

/// Anchor custom errors start at 6000
pub const ERROR_CODE_OFFSET: u32 = 6000;

// Provider environment, as read by Anchor's own tooling
pub const ANCHOR_PROVIDER_URL_ENV: &str = "ANCHOR_PROVIDER_URL";
pub const ANCHOR_WALLET_ENV: &str = "ANCHOR_WALLET";

pub const LOCALNET_URL: &str = "http://127.0.0.1:8899";
pub const DEVNET_URL: &str = "https://api.devnet.solana.com";
pub const TESTNET_URL: &str = "https://api.testnet.solana.com";
pub const MAINNET_URL: &str = "https://api.mainnet-beta.solana.com";

/// Default signer location of the Solana CLI, relative to `$HOME`
pub const DEFAULT_WALLET_PATH: &str = ".config/solana/id.json";

/// Workspace manifest looked up in the current directory
pub const ANCHOR_TOML: &str = "Anchor.toml";

// Launch values written by `initialize` when no overrides are given
pub const DEFAULT_INITIAL_VIRTUAL_TOKEN_RESERVES: u64 = 1_073_000_000_000_000;
pub const DEFAULT_INITIAL_VIRTUAL_SOL_RESERVES: u64 = 30_000_000_000;
pub const DEFAULT_INITIAL_REAL_TOKEN_RESERVES: u64 = 793_100_000_000_000;
pub const DEFAULT_TOKEN_TOTAL_SUPPLY: u64 = 1_000_000_000_000_000;
pub const DEFAULT_MINT_DECIMALS: u8 = 6;
pub const DEFAULT_MIGRATE_FEE_AMOUNT: u64 = 500;
