//! # Component Lifecycle Management
//!
//! A capability trait for anything with a startup/shutdown lifecycle, and a
//! manager that drives an ordered set of such components: `init` in
//! registration order, `run` once everything initialized, then block until
//! cancellation and `stop` in reverse order.
//!
//! The manager holds no domain logic. Its one hard guarantee is the unwind on
//! partial startup failure: if a component's `init` fails, every component
//! that already initialized is stopped in reverse order before the error is
//! surfaced, and nothing after the failed component is ever touched.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::error::Result;

/// Lifecycle capability implemented by every managed component.
#[async_trait]
pub trait Component: Send + Sync {
    /// Stable name used for log context.
    fn name(&self) -> &'static str;

    /// Acquire resources (connections, subscriptions). Called once, in
    /// registration order, before any component runs.
    async fn init(&self) -> Result<()>;

    /// Start doing work. Must return promptly - a component with ongoing
    /// work spawns its own task and ties it to `shutdown`.
    async fn run(&self, shutdown: CancellationToken);

    /// Release resources. Called in reverse registration order; a failure
    /// here is logged by the manager but never aborts the unwind.
    async fn stop(&self) -> Result<()>;
}

/// Ordered-list orchestrator over [`Component`].
///
/// One entry point (`run`) and one mutation point (`add_component`).
#[derive(Default)]
pub struct ComponentManager {
    components: Vec<Arc<dyn Component>>,
}

impl ComponentManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component. Registration order determines startup order and
    /// (reversed) shutdown order.
    pub fn add_component(&mut self, component: Arc<dyn Component>) {
        self.components.push(component);
    }

    /// Drive the full lifecycle: init all, run all, block on cancellation,
    /// stop all in reverse.
    ///
    /// Returns the first `init` error after unwinding the components that had
    /// already initialized. Once all components are running, the call blocks
    /// until `shutdown` is cancelled.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<()> {
        let mut initialized = 0usize;
        for component in &self.components {
            info!(component = component.name(), "initializing component");
            if let Err(e) = component.init().await {
                error!(
                    component = component.name(),
                    error = %e,
                    "component init failed, unwinding started components"
                );
                self.stop_components(&self.components[..initialized]).await;
                return Err(e);
            }
            initialized += 1;
        }

        for component in &self.components {
            component.run(shutdown.clone()).await;
        }
        info!(count = self.components.len(), "🚀 all components running");

        shutdown.cancelled().await;
        info!("🛑 shutdown requested, stopping components");

        self.stop_components(&self.components).await;
        info!("✅ all components stopped");
        Ok(())
    }

    /// Stop the given components in reverse order, logging failures so every
    /// component gets its chance to stop.
    async fn stop_components(&self, components: &[Arc<dyn Component>]) {
        for component in components.iter().rev() {
            if let Err(e) = component.stop().await {
                warn!(
                    component = component.name(),
                    error = %e,
                    "component stop failed"
                );
            }
        }
    }
}
