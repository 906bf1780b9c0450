//! Output formats for built paths.

/// How a path should be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathFormat {
    /// Axum route with `{param}` placeholders left in place
    Route,
    /// Concrete HTTP path with every placeholder substituted
    Http,
}
