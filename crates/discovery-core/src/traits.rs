use async_trait::async_trait;
use std::collections::HashMap;

use crate::DiscoveryError;

/// Source of the transient keyword -> boost-weight mapping used by trend
/// scoring. Implementations typically wrap social/news feeds; the engine only
/// ever sees the resolved map.
#[async_trait]
pub trait ViralContextProvider: Send + Sync {
    async fn viral_context(&self) -> Result<HashMap<String, f64>, DiscoveryError>;
}
