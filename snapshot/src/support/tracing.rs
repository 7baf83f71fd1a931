//! Runtime-adjustable tracing level and stderr subscriber setup

use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use tracing::{Level, Subscriber};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry};

use crate::constants::LOG_LEVEL_ENV_VAR;

static CURRENT_LEVEL: AtomicU8 = AtomicU8::new(1); // WARN until configured

/// Tracing filter whose level can be changed at runtime
#[derive(Clone)]
pub struct DynamicFilter;

impl<S> Layer<S> for DynamicFilter
where
    S: Subscriber,
{
    fn enabled(
        &self,
        metadata: &tracing::Metadata<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) -> bool {
        TracingLevel::from_level(*metadata.level()).as_u8() <= CURRENT_LEVEL.load(Ordering::Relaxed)
    }
}

/// Tracing levels that can be selected at startup or changed later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational events and above
    Info,
    /// Per-node generation events and above
    Debug,
    /// Everything, including per-accessor events
    Trace,
}

impl FromStr for TracingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(format!(
                "Invalid tracing level '{s}'. Valid levels are: error, warn, info, debug, trace"
            )),
        }
    }
}

impl TracingLevel {
    const fn as_u8(self) -> u8 {
        match self {
            Self::Error => 0,
            Self::Warn => 1,
            Self::Info => 2,
            Self::Debug => 3,
            Self::Trace => 4,
        }
    }

    fn from_level(level: Level) -> Self {
        match level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO => Self::Info,
            Level::DEBUG => Self::Debug,
            Level::TRACE => Self::Trace,
        }
    }

    /// Lowercase level name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Level named by the environment, `Warn` when unset or unparseable
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(LOG_LEVEL_ENV_VAR)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(Self::Warn)
    }

    /// Install a stderr subscriber filtered at the level named by the environment
    ///
    /// Does nothing if a global subscriber is already installed.
    pub fn init_tracing() {
        Self::set_tracing_level(Self::from_env());

        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_line_number(true);

        let _ = Registry::default()
            .with(DynamicFilter)
            .with(stderr_layer)
            .try_init();
    }

    /// Level the dynamic filter currently lets through
    #[must_use]
    pub fn get_current_tracing_level() -> Self {
        match CURRENT_LEVEL.load(Ordering::Relaxed) {
            0 => Self::Error,
            2 => Self::Info,
            3 => Self::Debug,
            4 => Self::Trace,
            _ => Self::Warn,
        }
    }

    /// Change the level the dynamic filter lets through
    pub fn set_tracing_level(level: Self) {
        CURRENT_LEVEL.store(level.as_u8(), Ordering::Relaxed);
        tracing::debug!("Tracing level set to: {}", level.as_str());
    }
}
