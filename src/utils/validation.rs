// file: src/utils/validation.rs
// description: input validation for urls, ports and operator-supplied values
// reference: input validation patterns

use crate::error::{OpsError, Result};

pub struct Validator;

impl Validator {
    pub fn validate_url(url: &str) -> Result<()> {
        let rest = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"))
            .ok_or_else(|| OpsError::Validation(format!("Invalid URL format: {}", url)))?;

        if rest.is_empty() || rest.starts_with('/') {
            return Err(OpsError::Validation(format!("URL has no host: {}", url)));
        }
        Ok(())
    }

    pub fn validate_port(port: u16) -> Result<()> {
        if port == 0 {
            return Err(OpsError::Validation("Port cannot be 0".to_string()));
        }
        Ok(())
    }

    pub fn parse_port(value: &str) -> Result<u16> {
        let port = value
            .trim()
            .parse::<u16>()
            .map_err(|_| OpsError::Validation(format!("Invalid port: {:?}", value)))?;
        Self::validate_port(port)?;
        Ok(port)
    }

    pub fn validate_question(question: &str) -> Result<()> {
        if question.trim().is_empty() {
            return Err(OpsError::Validation("Question is empty".to_string()));
        }
        Ok(())
    }

    pub fn validate_limit(limit: usize) -> Result<()> {
        if limit == 0 {
            return Err(OpsError::Validation(
                "Limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Joins an endpoint path onto a base url without doubling the slash.
    pub fn join_url(base: &str, path: &str) -> String {
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
