//! Smoke-test client for the moonshot program.
//!
//! The crate carries the client side of the program interface (program id,
//! PDA seeds, instruction layout, account layout, error codes) and a
//! [`SmokeRunner`] that connects to a cluster, resolves the deployed program
//! and issues a single `initialize` call.
//!
//! ```no_run
//! use moonshot_smoke::{ProviderConfig, RpcConnector, SmokeRunner};
//!
//! # async fn run() -> Result<(), moonshot_smoke::SmokeError> {
//! let config = ProviderConfig::from_env()?;
//! let signature = SmokeRunner::new(config, RpcConnector).run().await?;
//! println!("Your transaction signature {signature}");
//! # Ok(())
//! # }
//! ```

use anchor_lang::prelude::*;

pub mod config;
pub mod constants;
pub mod context;
pub mod errors;
pub mod instructions;
pub mod program;
pub mod runner;
pub mod state;
pub mod transport;

pub use config::{AnchorToml, Cluster, ProviderConfig};
pub use context::ConnectionContext;
pub use errors::{
    ConfigError, MoonshotError, ProgramRejection, RemoteCallError, ResolutionError, SmokeError,
    TransportError,
};
pub use program::{MoonshotProgram, ProgramRegistry, TransactionResult};
pub use runner::SmokeRunner;
pub use state::{Global, GlobalSettingsInput, ProgramStatus};
pub use transport::{Connector, RpcConnector, RpcTransport};

declare_id!("GbguYRqMUzErdhvxLL2dNGqi8wLzWnkp87wd7MnCqkZ3");
