//! Observable render events.
//!
//! The facade reports cache traffic, rejected configuration, and render
//! failures through two channels at once: structured [`tracing`] output for
//! operators, and registered listeners for programmatic observers (tests,
//! metrics shims). Listeners are synchronous and must not panic.

/// A notification emitted during a render call or configuration change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    /// A configured cache already held the rendered output for this key.
    CacheHit {
        /// The composite cache key that matched.
        key: String,
    },
    /// A configured cache did not hold the key; the engine will run.
    CacheMiss {
        /// The composite cache key that was probed.
        key: String,
    },
    /// Configuration was rejected and left unchanged (never an error).
    Warning(String),
    /// A render call failed and degraded to an empty result.
    Error(String),
}

/// Boxed listener invoked for every emitted [`RenderEvent`].
pub type EventListener = Box<dyn Fn(&RenderEvent) + Send + Sync>;

/// Dispatches events to listeners and mirrors them to `tracing`.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<EventListener>,
}

impl EventBus {
    /// Register a listener. Listeners are called in registration order.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&RenderEvent) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Emit an event to the log and to every registered listener.
    pub fn emit(&self, event: RenderEvent) {
        match &event {
            RenderEvent::CacheHit { key } => tracing::debug!("render cache hit: {key}"),
            RenderEvent::CacheMiss { key } => tracing::debug!("render cache miss: {key}"),
            RenderEvent::Warning(message) => tracing::warn!("{message}"),
            RenderEvent::Error(message) => tracing::error!("{message}"),
        }

        for listener in &self.listeners {
            listener(&event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus").field("listeners", &self.listeners.len()).finish()
    }
}
