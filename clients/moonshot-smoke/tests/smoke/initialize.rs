//! Tests for the initialize call against the built program
//!
//! NOTE: These tests are ignored by default because they load the moonshot
//! program binary, which this workspace does not build. Point `MOONSHOT_SO`
//! at the `.so` produced by the program's own `anchor build`:
//!
//! ```text
//! MOONSHOT_SO=/path/to/moonshot.so cargo test -p moonshot-smoke -- --ignored
//! ```

use std::{ffi::OsString, path::PathBuf};

use moonshot_smoke::{
    GlobalSettingsInput, MoonshotError, ProgramRegistry, ProgramStatus, RemoteCallError,
    SmokeError, SmokeRunner,
};
use solana_sdk::{commitment_config::CommitmentConfig, signature::Keypair};

use crate::common::{
    program_file_from, setup_litesvm_with_program, LiteSvmTransport, TempWallet,
};

/// Test successful initialization and the resulting global settings
#[tokio::test]
#[ignore = "requires the moonshot program binary - set MOONSHOT_SO to its .so path"]
async fn test_initialize_success() {
    let wallet = TempWallet::new();
    let transport = LiteSvmTransport::new(setup_litesvm_with_program());
    transport.airdrop(&wallet.pubkey(), 10_000_000_000);

    let runner = SmokeRunner::new(wallet.config(), transport.clone());
    let result = runner.run().await.expect("Initialize should succeed");
    assert!(!result.to_string().is_empty());

    let global = runner
        .inspect_global()
        .await
        .unwrap()
        .expect("Global settings should exist");
    assert!(global.initialized);
    assert_eq!(global.status, ProgramStatus::Running);
    assert_eq!(global.global_authority, wallet.pubkey());
    assert_eq!(global.migration_authority, wallet.pubkey());
    assert_eq!(global.mint_decimals, 6);
    assert_eq!(global.token_total_supply, 1_000_000_000_000_000);

    println!("✅ test_initialize_success passed");
}

/// Test that a second initialize is rejected
#[tokio::test]
#[ignore = "requires the moonshot program binary - set MOONSHOT_SO to its .so path"]
async fn test_initialize_twice_fails() {
    let wallet = TempWallet::new();
    let transport = LiteSvmTransport::new(setup_litesvm_with_program());
    transport.airdrop(&wallet.pubkey(), 10_000_000_000);

    let runner = SmokeRunner::new(wallet.config(), transport.clone());
    runner.run().await.expect("First initialize should succeed");

    transport.expire_blockhash();
    let err = runner.run().await.unwrap_err();

    // The global PDA already exists, so the system program refuses to
    // create it again (custom error 0, account already in use)
    let SmokeError::RemoteCall(RemoteCallError::Rejected(rejection)) = err else {
        panic!("Second initialize should be rejected");
    };
    assert_eq!(rejection.code, 0);
    assert!(rejection.error().is_none());

    println!("✅ test_initialize_twice_fails passed");
}

/// Test that zero mint decimals are refused by the program
#[tokio::test]
#[ignore = "requires the moonshot program binary - set MOONSHOT_SO to its .so path"]
async fn test_initialize_without_settings_fails() {
    let transport = LiteSvmTransport::new(setup_litesvm_with_program());
    let context = moonshot_smoke::ConnectionContext::new(
        moonshot_smoke::Cluster::Localnet,
        Keypair::new(),
        CommitmentConfig::confirmed(),
    );
    transport.airdrop(&context.payer_pubkey(), 10_000_000_000);

    let program = ProgramRegistry::default()
        .resolve("moonshot", &context, &transport)
        .await
        .unwrap();
    let err = program
        .initialize_with(GlobalSettingsInput::empty())
        .await
        .unwrap_err();

    assert!(matches!(
        err.rejection().and_then(|rejection| rejection.error()),
        Some(MoonshotError::InvalidArgument)
    ));
    assert!(program.fetch_global().await.unwrap().is_none());

    println!("✅ test_initialize_without_settings_fails passed");
}

/// Test that an explicit program path overrides the deploy locations
#[test]
fn test_program_file_from_explicit_path() {
    let explicit = OsString::from("/opt/moonshot/moonshot.so");
    assert_eq!(
        program_file_from(Some(explicit)),
        PathBuf::from("/opt/moonshot/moonshot.so")
    );

    let fallback = program_file_from(None);
    assert!(fallback.ends_with("target/deploy/moonshot.so"));

    println!("✅ test_program_file_from_explicit_path passed");
}
