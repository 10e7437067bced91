use std::{fmt, path::PathBuf};

use anchor_lang::error_code;
use solana_client::client_error::ClientError;
use solana_sdk::{
    instruction::InstructionError, pubkey::Pubkey, signature::Signature,
    transaction::TransactionError,
};

use crate::constants::ERROR_CODE_OFFSET;

/// Error table of the moonshot program, in declaration order.
#[error_code]
pub enum MoonshotError {
    #[msg("Invalid Global Authority")]
    InvalidGlobalAuthority,
    #[msg("Invalid Withdraw Authority")]
    InvalidWithdrawAuthority,
    #[msg("Invalid Argument")]
    InvalidArgument,

    #[msg("Global Already Initialized")]
    AlreadyInitialized,
    #[msg("Global Not Initialized")]
    NotInitialized,

    #[msg("Not in Running State")]
    ProgramNotRunning,

    #[msg("Bonding Curve Complete")]
    BondingCurveComplete,
    #[msg("Bonding Curve Not Complete")]
    BondingCurveNotComplete,

    #[msg("Insufficient User Tokens")]
    InsufficientUserTokens,
    #[msg("Insufficient user SOL")]
    InsufficientUserSOL,

    #[msg("Slippage Exceeded")]
    SlippageExceeded,
    #[msg("Swap exactInAmount is 0")]
    MinSwap,

    #[msg("Buy Failed")]
    BuyFailed,
    #[msg("Sell Failed")]
    SellFailed,

    #[msg("Bonding Curve Invariant Failed")]
    BondingCurveInvariant,
    #[msg("Curve Not Started")]
    CurveNotStarted,
    #[msg("Start time is in the past")]
    InvalidStartTime,

    #[msg("Whitelist is already initialized")]
    WlInitializeFailed,
    #[msg("Whitelist is not initialized")]
    WlNotInitializeFailed,
    #[msg("This creator already in whitelist")]
    AddFailed,
    #[msg("This creator is not in whitelist")]
    RemoveFailed,
    #[msg("The WL account is not initialized")]
    WlNotInitialized,
    #[msg("This creator is not in whitelist")]
    NotWhiteList,

    #[msg("Bonding curve is not completed")]
    NotCompleted,
    #[msg("This token is not a bonding curve token")]
    NotBondingCurveMint,
    #[msg("Not quote mint")]
    NotSOL,
    #[msg("Not equel config")]
    InvalidConfig,

    #[msg("Arithmetic Error")]
    ArithmeticError,
    #[msg("Invalid Fee Receiver")]
    InvalidFeeReceiver,
    #[msg("Invalid Migration Authority")]
    InvalidMigrationAuthority,
}

impl MoonshotError {
    const ALL: [MoonshotError; 30] = [
        MoonshotError::InvalidGlobalAuthority,
        MoonshotError::InvalidWithdrawAuthority,
        MoonshotError::InvalidArgument,
        MoonshotError::AlreadyInitialized,
        MoonshotError::NotInitialized,
        MoonshotError::ProgramNotRunning,
        MoonshotError::BondingCurveComplete,
        MoonshotError::BondingCurveNotComplete,
        MoonshotError::InsufficientUserTokens,
        MoonshotError::InsufficientUserSOL,
        MoonshotError::SlippageExceeded,
        MoonshotError::MinSwap,
        MoonshotError::BuyFailed,
        MoonshotError::SellFailed,
        MoonshotError::BondingCurveInvariant,
        MoonshotError::CurveNotStarted,
        MoonshotError::InvalidStartTime,
        MoonshotError::WlInitializeFailed,
        MoonshotError::WlNotInitializeFailed,
        MoonshotError::AddFailed,
        MoonshotError::RemoveFailed,
        MoonshotError::WlNotInitialized,
        MoonshotError::NotWhiteList,
        MoonshotError::NotCompleted,
        MoonshotError::NotBondingCurveMint,
        MoonshotError::NotSOL,
        MoonshotError::InvalidConfig,
        MoonshotError::ArithmeticError,
        MoonshotError::InvalidFeeReceiver,
        MoonshotError::InvalidMigrationAuthority,
    ];

    /// Custom program error code as reported in `InstructionError::Custom`
    pub fn code(self) -> u32 {
        ERROR_CODE_OFFSET + self as u32
    }

    /// Map a custom program error code back to the program's error table
    pub fn from_code(code: u32) -> Option<Self> {
        let index = code.checked_sub(ERROR_CODE_OFFSET)? as usize;
        Self::ALL.get(index).copied()
    }
}

/// A transaction the cluster executed and the program (or the runtime on
/// its behalf) rejected with a custom error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramRejection {
    /// Index of the failing instruction in the transaction
    pub instruction: u8,
    pub code: u32,
}

impl ProgramRejection {
    pub fn from_transaction_error(error: &TransactionError) -> Option<Self> {
        match error {
            TransactionError::InstructionError(instruction, InstructionError::Custom(code)) => {
                Some(Self {
                    instruction: *instruction,
                    code: *code,
                })
            }
            _ => None,
        }
    }

    /// The program's own error, if the code is in its table
    pub fn error(&self) -> Option<MoonshotError> {
        MoonshotError::from_code(self.code)
    }
}

impl fmt::Display for ProgramRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error() {
            Some(error) => write!(
                f,
                "instruction {} failed with program error {} ({:?}): {}",
                self.instruction, self.code, error, error
            ),
            None => write!(
                f,
                "instruction {} failed with custom error {:#x}",
                self.instruction, self.code
            ),
        }
    }
}

/// Failure of the provider configuration or the signer it names
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing `{0}` in the environment")]
    MissingEnv(&'static str),
    #[error("invalid cluster `{0}`: expected localnet, devnet, testnet, mainnet or an http(s) URL")]
    InvalidCluster(String),
    #[error("invalid commitment `{0}`: expected processed, confirmed or finalized")]
    InvalidCommitment(String),
    #[error("failed to read wallet keypair {}: {reason}", path.display())]
    Wallet { path: PathBuf, reason: String },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed Anchor.toml: {0}")]
    Manifest(#[from] toml::de::Error),
    #[error("invalid address `{address}` for program `{name}`")]
    InvalidProgramAddress { name: String, address: String },
}

/// Failure of the RPC layer underneath a remote call
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("rpc request failed: {0}")]
    Rpc(Box<ClientError>),
    #[error("transaction failed: {0}")]
    Transaction(TransactionError),
    #[error("transaction {0} was not confirmed")]
    Unconfirmed(Signature),
}

impl From<ClientError> for TransportError {
    fn from(error: ClientError) -> Self {
        match error.get_transaction_error() {
            Some(error) => Self::Transaction(error),
            None => Self::Rpc(Box::new(error)),
        }
    }
}

impl From<TransactionError> for TransportError {
    fn from(error: TransactionError) -> Self {
        Self::Transaction(error)
    }
}

/// The named program could not be located on the cluster
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("program `{0}` is not registered in the workspace")]
    NotRegistered(String),
    #[error("program {0} is not deployed")]
    NotDeployed(Pubkey),
    #[error("account {0} is not an executable program")]
    NotExecutable(Pubkey),
    #[error("failed to look up program {address}: {source}")]
    Lookup {
        address: Pubkey,
        source: TransportError,
    },
}

/// The remote call was rejected or could not be confirmed
#[derive(Debug, thiserror::Error)]
pub enum RemoteCallError {
    #[error("{0}")]
    Rejected(ProgramRejection),
    #[error(transparent)]
    Transport(TransportError),
    #[error("failed to decode account {address}: {reason}")]
    Decode { address: Pubkey, reason: String },
}

impl RemoteCallError {
    /// The rejection, if the program (or runtime) rejected the instruction
    pub fn rejection(&self) -> Option<&ProgramRejection> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

impl From<TransportError> for RemoteCallError {
    fn from(error: TransportError) -> Self {
        if let TransportError::Transaction(transaction_error) = &error {
            if let Some(rejection) = ProgramRejection::from_transaction_error(transaction_error) {
                return Self::Rejected(rejection);
            }
        }
        Self::Transport(error)
    }
}

/// Outcome of a failed smoke run, surfaced to the harness unmodified
#[derive(Debug, thiserror::Error)]
pub enum SmokeError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
    #[error("resolution error: {0}")]
    Resolution(#[from] ResolutionError),
    #[error("remote call error: {0}")]
    RemoteCall(#[from] RemoteCallError),
}
