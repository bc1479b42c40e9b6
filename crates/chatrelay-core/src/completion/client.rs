//! CompletionClient trait definition.

use chatrelay_types::error::CompletionError;

/// A remote model that turns one prompt into one completion.
///
/// Implementations must not retry; every failure is returned as-is.
pub trait CompletionClient: Send + Sync {
    /// Short name used in logs and the status output (e.g., "azure").
    fn name(&self) -> &str;

    /// Send `prompt` as a single user message and return the reply text.
    fn complete(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, CompletionError>> + Send;
}
