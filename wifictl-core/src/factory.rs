use crate::config::WifiConfig;
use crate::traits::CommandRunner;
use std::sync::Arc;

/// Creates the command runner selected at compile time.
pub fn create_runner(config: &WifiConfig) -> Arc<dyn CommandRunner> {
    #[cfg(feature = "backend_mock")]
    {
        let _ = config;
        tracing::info!("👻 Backend: simulated NetworkManager selected (for local development)");
        Arc::new(crate::backends::mock::MockBackend::new())
    }
    #[cfg(not(feature = "backend_mock"))]
    {
        tracing::info!(program = %config.nmcli_path, "📦 Backend: nmcli selected");
        Arc::new(crate::backends::nmcli::NmcliRunner::new(config.nmcli_path.clone()))
    }
}
