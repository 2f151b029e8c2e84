//! Validation context for passing runtime information to analyzers.
//!
//! Analyzers build queries against a logical table name that the host picks
//! at run time. The context carries that name through a task-local, so the
//! analyzer API does not need a table-name parameter on every call.

use std::future::Future;
use std::sync::Arc;

/// Runtime context for analyzer execution.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    /// The name of the table being analyzed
    table_name: Arc<str>,
}

impl ValidationContext {
    /// Creates a new validation context with the specified table name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pattern_guard::core::ValidationContext;
    ///
    /// let ctx = ValidationContext::new("customer_data");
    /// assert_eq!(ctx.table_name(), "customer_data");
    /// ```
    pub fn new(table_name: impl Into<Arc<str>>) -> Self {
        Self {
            table_name: table_name.into(),
        }
    }

    /// Returns the name of the table being analyzed.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new("data")
    }
}

// Task-local storage for the current validation context, so analyzers can
// resolve the table name without threading it through every signature.
tokio::task_local! {
    pub static CURRENT_CONTEXT: ValidationContext;
}

/// Gets the current validation context.
///
/// Returns the default context (table `"data"`) if none has been set.
pub fn current_validation_context() -> ValidationContext {
    CURRENT_CONTEXT
        .try_with(|ctx| ctx.clone())
        .unwrap_or_default()
}

/// Runs a future with the given validation context installed.
///
/// # Examples
///
/// ```rust,ignore
/// use pattern_guard::core::{with_validation_context, ValidationContext};
///
/// let metric = with_validation_context(ValidationContext::new("customers"), async {
///     runner.run(&ctx).await
/// })
/// .await?;
/// ```
pub async fn with_validation_context<F, T>(context: ValidationContext, future: F) -> T
where
    F: Future<Output = T>,
{
    CURRENT_CONTEXT.scope(context, future).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_creation() {
        let ctx = ValidationContext::new("test_table");
        assert_eq!(ctx.table_name(), "test_table");
    }

    #[test]
    fn default_table_name() {
        assert_eq!(ValidationContext::default().table_name(), "data");
    }

    #[tokio::test]
    async fn falls_back_to_default_outside_a_scope() {
        assert_eq!(current_validation_context().table_name(), "data");
    }

    #[tokio::test]
    async fn scoped_context_is_visible() {
        let table_name = with_validation_context(ValidationContext::new("customers"), async {
            current_validation_context().table_name().to_string()
        })
        .await;
        assert_eq!(table_name, "customers");
    }
}
