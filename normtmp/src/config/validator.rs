//! Configuration validation.

use crate::config::schema::{Config, QuerySettings};
use crate::error::{Error, Result};

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use normtmp::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns validation errors for invalid configurations.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref query) = config.query {
            Self::validate_query(query)?;
        }
        Ok(())
    }

    /// The query program must name something runnable.
    fn validate_query(query: &QuerySettings) -> Result<()> {
        let Some(ref program) = query.program else {
            return Ok(());
        };

        if program.trim().is_empty() {
            return Err(Error::Validation {
                field: "query.program".into(),
                message: "Cannot be empty or only whitespace".into(),
            });
        }

        if program.contains('\0') {
            return Err(Error::Validation {
                field: "query.program".into(),
                message: "Cannot contain null bytes".into(),
            });
        }

        Ok(())
    }
}
