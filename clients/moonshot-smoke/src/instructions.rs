//! Instruction builders for the moonshot program.
//!
//! Mirrors what Anchor generates for a program's client: an `instruction`
//! module with the argument structs (`.data()` prefixes the discriminator)
//! and an `accounts` module with the account structs
//! (`.to_account_metas()` keeps the declared order and flags).

use anchor_lang::{system_program, InstructionData, ToAccountMetas};
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

use crate::{constants::EVENT_AUTHORITY_SEED, state::Global, state::GlobalSettingsInput};

pub mod instruction {
    use anchor_lang::prelude::*;
    use anchor_lang::{Discriminator, InstructionData};

    use crate::state::GlobalSettingsInput;

    #[derive(AnchorSerialize)]
    pub struct Initialize {
        pub params: GlobalSettingsInput,
    }

    // sha256("global:initialize")[..8]
    impl Discriminator for Initialize {
        const DISCRIMINATOR: &'static [u8] = &[175, 175, 109, 31, 13, 152, 155, 237];
    }

    impl InstructionData for Initialize {}
}

pub mod accounts {
    use anchor_lang::ToAccountMetas;
    use solana_sdk::{instruction::AccountMeta, pubkey::Pubkey};

    /// Accounts of `initialize`, including the two event-cpi accounts
    /// Anchor appends to the declared ones.
    pub struct Initialize {
        pub authority: Pubkey,
        pub global: Pubkey,
        pub system_program: Pubkey,
        pub event_authority: Pubkey,
        pub program: Pubkey,
    }

    impl ToAccountMetas for Initialize {
        fn to_account_metas(&self, is_signer: Option<bool>) -> Vec<AccountMeta> {
            vec![
                AccountMeta::new(self.authority, is_signer.unwrap_or(true)),
                AccountMeta::new(self.global, false),
                AccountMeta::new_readonly(self.system_program, false),
                AccountMeta::new_readonly(self.event_authority, false),
                AccountMeta::new_readonly(self.program, false),
            ]
        }
    }
}

/// Derive the Anchor event authority PDA for CPI events
pub fn derive_event_authority(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[EVENT_AUTHORITY_SEED], program_id).0
}

/// Build the initialize instruction
///
/// Accounts:
/// 0. authority (writable, signer) - pays for and becomes authority of `global`
/// 1. global (writable) - settings PDA to create
/// 2. system_program
/// 3. event_authority
/// 4. program
pub fn build_initialize_ix(
    program_id: &Pubkey,
    authority: &Pubkey,
    params: GlobalSettingsInput,
) -> Instruction {
    let instruction_data = instruction::Initialize { params };
    let accounts = accounts::Initialize {
        authority: *authority,
        global: Global::address(program_id).0,
        system_program: system_program::ID,
        event_authority: derive_event_authority(program_id),
        program: *program_id,
    };

    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(None),
        data: instruction_data.data(),
    }
}
