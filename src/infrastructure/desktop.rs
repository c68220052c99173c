use crate::domain::ports::{CorrelationToken, IntentResolver, UserNotifier};
use crate::error::{Result, UpiError};
use async_trait::async_trait;
use std::io;
use tokio::process::Command;
use url::Url;

/// Resolves and opens `upi://` links through the freedesktop MIME database.
///
/// `has_handler` asks `xdg-mime` for the default `x-scheme-handler/upi`
/// application; `dispatch` hands the link to `xdg-open`. A desktop has no
/// chooser or result channel, so the title and token are only logged.
#[derive(Debug, Clone)]
pub struct DesktopIntentResolver {
    query_program: String,
    open_program: String,
}

impl Default for DesktopIntentResolver {
    fn default() -> Self {
        Self {
            query_program: "xdg-mime".to_string(),
            open_program: "xdg-open".to_string(),
        }
    }
}

impl DesktopIntentResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the programs used to query and open links.
    pub fn with_programs(query_program: impl Into<String>, open_program: impl Into<String>) -> Self {
        Self {
            query_program: query_program.into(),
            open_program: open_program.into(),
        }
    }
}

#[async_trait]
impl IntentResolver for DesktopIntentResolver {
    async fn has_handler(&self, uri: &Url) -> Result<bool> {
        let mime = format!("x-scheme-handler/{}", uri.scheme());
        let output = match Command::new(&self.query_program)
            .args(["query", "default", &mime])
            .output()
            .await
        {
            Ok(output) => output,
            // No xdg tooling means nothing can be resolved.
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(program = %self.query_program, "resolver program not found");
                return Ok(false);
            }
            Err(e) => return Err(UpiError::Io(e)),
        };

        let handler = String::from_utf8_lossy(&output.stdout);
        let handler = handler.trim();
        tracing::debug!(%mime, handler, "queried default handler");
        Ok(output.status.success() && !handler.is_empty())
    }

    async fn dispatch(
        &self,
        uri: &Url,
        chooser_title: &str,
        token: CorrelationToken,
    ) -> Result<()> {
        tracing::info!(%uri, chooser_title, %token, "opening payment link");
        let status = Command::new(&self.open_program)
            .arg(uri.as_str())
            .status()
            .await?;
        if status.success() {
            Ok(())
        } else {
            Err(UpiError::Host(format!(
                "{} exited with {status}",
                self.open_program
            )))
        }
    }
}

/// Prints notifications on stderr.
#[derive(Debug, Default, Clone)]
pub struct StderrNotifier;

#[async_trait]
impl UserNotifier for StderrNotifier {
    async fn notify(&self, message: &str) {
        tracing::debug!(text = message, "user notification");
        eprintln!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_query_program_means_no_handler() {
        let resolver = DesktopIntentResolver::with_programs(
            "upi-dispatch-test-no-such-program",
            "upi-dispatch-test-no-such-program",
        );
        let uri = Url::parse("upi://pay?cu=INR").unwrap();
        assert!(!resolver.has_handler(&uri).await.unwrap());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_empty_query_output_means_no_handler() {
        // `true` succeeds without printing a handler name.
        let resolver = DesktopIntentResolver::with_programs("true", "true");
        let uri = Url::parse("upi://pay?cu=INR").unwrap();
        assert!(!resolver.has_handler(&uri).await.unwrap());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dispatch_reports_failing_opener() {
        let resolver = DesktopIntentResolver::with_programs("true", "false");
        let uri = Url::parse("upi://pay?cu=INR").unwrap();
        let result = resolver
            .dispatch(&uri, "Pay Using", CorrelationToken::PAYMENT)
            .await;
        assert!(matches!(result, Err(UpiError::Host(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dispatch_succeeds_with_working_opener() {
        let resolver = DesktopIntentResolver::with_programs("true", "true");
        let uri = Url::parse("upi://pay?cu=INR").unwrap();
        resolver
            .dispatch(&uri, "Pay Using", CorrelationToken::PAYMENT)
            .await
            .unwrap();
    }
}
