//! # PathBuilder
//!
//! Builder for VMC and CSP API paths.
//!
//! ```
//! use paths::{PathBuilder, PathFormat, VmcOperation};
//!
//! let path = PathBuilder::new()
//!     .operation(VmcOperation::GetSddc)
//!     .org("my-org")
//!     .sddc("my-sddc")
//!     .build(PathFormat::Http)
//!     .unwrap();
//! assert_eq!(path, "/vmc/api/orgs/my-org/sddcs/my-sddc");
//! ```

use crate::errors::PathBuilderError;
use crate::formats::PathFormat;
use crate::operations::Operation;

#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    operation: Option<Operation>,
    org: Option<String>,
    sddc: Option<String>,
    task: Option<String>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn operation(mut self, operation: impl Into<Operation>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    #[must_use]
    pub fn org(mut self, org: impl Into<String>) -> Self {
        self.org = Some(org.into());
        self
    }

    #[must_use]
    pub fn sddc(mut self, sddc: impl Into<String>) -> Self {
        self.sddc = Some(sddc.into());
        self
    }

    #[must_use]
    pub fn task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Render the path in the requested format
    ///
    /// # Errors
    ///
    /// Returns an error if no operation was set, or (for `PathFormat::Http`)
    /// if a placeholder has no value or a value contains path syntax.
    pub fn build(&self, format: PathFormat) -> Result<String, PathBuilderError> {
        let operation = self.operation.ok_or(PathBuilderError::MissingOperation)?;
        let template = operation.template();

        if format == PathFormat::Route {
            return Ok(template.to_string());
        }

        let mut path = template.to_string();
        for (parameter, value) in [
            ("org", self.org.as_deref()),
            ("sddc", self.sddc.as_deref()),
            ("task", self.task.as_deref()),
        ] {
            let placeholder = format!("{{{parameter}}}");
            if !path.contains(&placeholder) {
                continue;
            }
            let value = value.ok_or(PathBuilderError::MissingParameter {
                operation,
                parameter,
            })?;
            validate_segment(parameter, value)?;
            path = path.replace(&placeholder, value);
        }

        Ok(path)
    }
}

fn validate_segment(parameter: &'static str, value: &str) -> Result<(), PathBuilderError> {
    let invalid = value.is_empty()
        || value.contains(['/', '?', '#', '%'])
        || value.chars().any(char::is_whitespace);
    if invalid {
        return Err(PathBuilderError::InvalidSegment {
            parameter,
            value: value.to_string(),
        });
    }
    Ok(())
}
