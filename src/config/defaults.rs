//! Built-in configuration values

use crate::core::types::Namespace;

/// Default configuration structure
#[derive(Debug, Clone)]
pub struct ConfigDefaults {
    pub logging: LoggingDefaults,
    pub event: EventDefaults,
}

/// Default logging configuration
#[derive(Debug, Clone)]
pub struct LoggingDefaults {
    pub level: String,
    pub ansi: bool,
}

/// Default event configuration
#[derive(Debug, Clone)]
pub struct EventDefaults {
    pub default_namespace: Namespace,
}

/// Returns the default configuration
pub fn default_config() -> ConfigDefaults {
    ConfigDefaults {
        logging: LoggingDefaults {
            level: "warn".to_string(),
            ansi: false,
        },
        event: EventDefaults {
            default_namespace: Namespace::Default,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_defaults() {
        let config = default_config();
        assert_eq!(config.logging.level, "warn");
        assert!(!config.logging.ansi);
    }

    #[test]
    fn test_event_defaults() {
        let config = default_config();
        assert_eq!(config.event.default_namespace, Namespace::Default);
    }
}
