#![forbid(unsafe_code)]

//! Loop configuration.

use std::time::Duration;

use halfcell_style::CompiledStyle;

use crate::emitter::OncePolicy;

/// Settings for [`Tui`](crate::Tui).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use halfcell_runtime::TuiConfig;
///
/// let config = TuiConfig::default()
///     .with_update_interval(Duration::from_millis(32))
///     .with_signal_hooks(false);
/// assert_eq!(config.update_interval(), Some(Duration::from_millis(32)));
/// ```
#[derive(Debug, Clone)]
pub struct TuiConfig {
    update_interval: Option<Duration>,
    background: Option<CompiledStyle>,
    install_signal_hooks: bool,
    once_policy: OncePolicy,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            update_interval: None,
            background: None,
            install_signal_hooks: true,
            once_policy: OncePolicy::default(),
        }
    }
}

impl TuiConfig {
    /// Interval between update ticks. Defaults to the canvas refresh interval.
    #[must_use]
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = Some(interval);
        self
    }

    /// Style the visible area is cleared to before components draw.
    #[must_use]
    pub fn with_background(mut self, style: CompiledStyle) -> Self {
        self.background = Some(style);
        self
    }

    /// Whether `run` registers OS signal hooks (default on).
    #[must_use]
    pub fn with_signal_hooks(mut self, install: bool) -> Self {
        self.install_signal_hooks = install;
        self
    }

    /// Once-listener policy of the lifecycle emitter.
    #[must_use]
    pub fn with_once_policy(mut self, policy: OncePolicy) -> Self {
        self.once_policy = policy;
        self
    }

    pub fn update_interval(&self) -> Option<Duration> {
        self.update_interval
    }

    pub fn background(&self) -> Option<&CompiledStyle> {
        self.background.as_ref()
    }

    pub fn install_signal_hooks(&self) -> bool {
        self.install_signal_hooks
    }

    pub fn once_policy(&self) -> OncePolicy {
        self.once_policy
    }
}
