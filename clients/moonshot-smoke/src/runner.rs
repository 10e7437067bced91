use tracing::{debug, info};

use crate::{
    config::ProviderConfig,
    constants::MOONSHOT_PROGRAM_NAME,
    context::ConnectionContext,
    errors::SmokeError,
    program::{ProgramRegistry, TransactionResult},
    state::Global,
    transport::Connector,
};

/// Runs the initialize smoke test: connect, resolve, call once, report.
///
/// Every failure is returned as is; nothing is retried.
pub struct SmokeRunner<C> {
    config: ProviderConfig,
    registry: ProgramRegistry,
    program: String,
    connector: C,
}

impl<C: Connector> SmokeRunner<C> {
    pub fn new(config: ProviderConfig, connector: C) -> Self {
        Self {
            config,
            registry: ProgramRegistry::default(),
            program: MOONSHOT_PROGRAM_NAME.to_string(),
            connector,
        }
    }

    pub fn with_registry(mut self, registry: ProgramRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Resolve a different workspace name than `moonshot`
    pub fn with_program(mut self, name: impl Into<String>) -> Self {
        self.program = name.into();
        self
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub async fn run(&self) -> Result<TransactionResult, SmokeError> {
        let context = ConnectionContext::from_config(&self.config)?;
        let transport = self.connector.connect(&context);
        let program = self
            .registry
            .resolve(&self.program, &context, &transport)
            .await?;

        debug!(program = %program.id(), payer = %context.payer_pubkey(), "calling initialize");
        let result = program.initialize().await?;

        info!("Your transaction signature {result}");
        Ok(result)
    }

    /// Read back the global settings account of the resolved program
    pub async fn inspect_global(&self) -> Result<Option<Global>, SmokeError> {
        let context = ConnectionContext::from_config(&self.config)?;
        let transport = self.connector.connect(&context);
        let program = self
            .registry
            .resolve(&self.program, &context, &transport)
            .await?;
        Ok(program.fetch_global().await?)
    }
}
