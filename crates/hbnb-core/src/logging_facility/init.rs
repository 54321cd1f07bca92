//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Pick a profile from a CLI verbosity count
    pub fn from_verbosity(verbose: u8) -> Self {
        if verbose == 0 {
            Profile::Production
        } else {
            Profile::Development
        }
    }

    fn default_filter(&self) -> &'static str {
        match self {
            Profile::Development => "hbnb=debug",
            Profile::Production => "hbnb=info",
            Profile::Test => "hbnb=trace",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at process start, before the storage engine is opened.
/// `RUST_LOG` overrides the profile's default filter.
///
/// # Profiles
///
/// - **Development**: Human-readable logs at debug level
/// - **Production**: JSON structured logs at info level
/// - **Test**: Bare registry; tests install capture via `init_test_capture()`
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_filter()));
        match profile {
            Profile::Development => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            Profile::Production => {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            Profile::Test => {
                tracing_subscriber::registry().init();
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        init(Profile::Test);
        init(Profile::Test);
        init(Profile::Development);
    }

    #[test]
    fn test_profile_from_verbosity() {
        assert_eq!(Profile::from_verbosity(0), Profile::Production);
        assert_eq!(Profile::from_verbosity(1), Profile::Development);
        assert_eq!(Profile::from_verbosity(3), Profile::Development);
    }

    #[test]
    fn test_default_filters_target_hbnb_crates() {
        for profile in [Profile::Development, Profile::Production, Profile::Test] {
            assert!(profile.default_filter().starts_with("hbnb="));
        }
    }
}
