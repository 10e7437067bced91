use anchor_lang::prelude::*;

use crate::constants::*;

/// Operating mode stored in the global settings account
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, InitSpace, Debug, PartialEq, Eq)]
pub enum ProgramStatus {
    Running,
    SwapOnly,
    SwapOnlyNoLaunch,
    Paused,
}

/// Global settings account
/// PDA seeds: [b"global"]
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct Global {
    pub status: ProgramStatus,
    pub initialized: bool,

    /// Can update settings
    pub global_authority: Pubkey,

    /// Can migrate completed curves
    pub migration_authority: Pubkey,

    pub migrate_fee_amount: u64,
    pub fee_receiver: Pubkey,
    pub initial_virtual_token_reserves: u64,
    pub initial_virtual_sol_reserves: u64,
    pub initial_real_token_reserves: u64,
    pub token_total_supply: u64,
    pub mint_decimals: u8,
    pub meteora_config: Pubkey,
    pub whitelist_enabled: bool,
}

impl Global {
    /// Account discriminator (8) + fields
    pub const SIZE: usize = 8 + Global::INIT_SPACE;

    /// Derive the global settings PDA for a program
    pub fn address(program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[GLOBAL_SEED], program_id)
    }
}

/// Argument of the `initialize` instruction.
///
/// Every field is optional; the program only overwrites the settings that
/// are present. `mint_decimals` must end up non-zero or the program rejects
/// the call, which is why [`Default`] fills in the launch values.
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct GlobalSettingsInput {
    pub initial_virtual_token_reserves: Option<u64>,
    pub initial_virtual_sol_reserves: Option<u64>,
    pub initial_real_token_reserves: Option<u64>,
    pub token_total_supply: Option<u64>,
    pub mint_decimals: Option<u8>,
    pub migrate_fee_amount: Option<u64>,
    pub fee_receiver: Option<Pubkey>,
    pub status: Option<ProgramStatus>,
    pub whitelist_enabled: Option<bool>,
    pub meteora_config: Option<Pubkey>,
}

impl GlobalSettingsInput {
    /// Settings with every field absent
    pub fn empty() -> Self {
        Self {
            initial_virtual_token_reserves: None,
            initial_virtual_sol_reserves: None,
            initial_real_token_reserves: None,
            token_total_supply: None,
            mint_decimals: None,
            migrate_fee_amount: None,
            fee_receiver: None,
            status: None,
            whitelist_enabled: None,
            meteora_config: None,
        }
    }
}

impl Default for GlobalSettingsInput {
    fn default() -> Self {
        Self {
            initial_virtual_token_reserves: Some(DEFAULT_INITIAL_VIRTUAL_TOKEN_RESERVES),
            initial_virtual_sol_reserves: Some(DEFAULT_INITIAL_VIRTUAL_SOL_RESERVES),
            initial_real_token_reserves: Some(DEFAULT_INITIAL_REAL_TOKEN_RESERVES),
            token_total_supply: Some(DEFAULT_TOKEN_TOTAL_SUPPLY),
            mint_decimals: Some(DEFAULT_MINT_DECIMALS),
            migrate_fee_amount: Some(DEFAULT_MIGRATE_FEE_AMOUNT),
            fee_receiver: None,
            status: Some(ProgramStatus::Running),
            whitelist_enabled: Some(true),
            meteora_config: None,
        }
    }
}
