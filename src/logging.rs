//! Installation of the diagnostics sink.
//!
//! The library only emits `tracing` events: registrations and failed
//! reactions at `info`, requirement and attempt traces at `debug`, rejected
//! registrations at `error`. Applications decide where those go by installing a subscriber,
//! either their own or the one built here.
//!
//! In verbose mode everything from `debug` up is written to stdout. Otherwise
//! only warnings and errors are written, to stderr. `RUST_LOG` overrides
//! either default.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log directive: {0}")]
    Directive(#[from] ParseError),
    #[error("a global subscriber is already installed")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    pub verbose: bool,
    /// Filter used when `RUST_LOG` is unset; defaults by verbosity.
    pub default_directive: Option<String>,
}

impl LogConfig {
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            default_directive: None,
        }
    }

    pub fn quiet() -> Self {
        Self::default()
    }

    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.default_directive = Some(directive.into());
        self
    }

    pub fn directive(&self) -> &str {
        match &self.default_directive {
            Some(directive) => directive,
            None if self.verbose => "debug",
            None => "warn",
        }
    }

    fn filter(&self) -> Result<EnvFilter, LoggingError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => Ok(EnvFilter::try_new(self.directive())?),
        }
    }
}

pub fn init(verbose: bool) -> Result<(), LoggingError> {
    init_with(&LogConfig {
        verbose,
        default_directive: None,
    })
}

pub fn init_with(config: &LogConfig) -> Result<(), LoggingError> {
    let builder = tracing_subscriber::fmt().with_env_filter(config.filter()?);
    let installed = if config.verbose {
        builder.with_writer(std::io::stdout).try_init()
    } else {
        builder.with_writer(std::io::stderr).try_init()
    };
    installed.map_err(|_| LoggingError::AlreadyInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_defaults_follow_verbosity() {
        assert_eq!(LogConfig::verbose().directive(), "debug");
        assert_eq!(LogConfig::quiet().directive(), "warn");
        assert_eq!(
            LogConfig::quiet().with_directive("chemreact=trace").directive(),
            "chemreact=trace"
        );
    }
}
