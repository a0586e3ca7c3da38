use crate::config::ExportConfig;
use crate::error::{Error, Result};
use crate::types::Timestamp;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs as async_fs;

/// A finished export on disk, ready to hand to a platform viewer.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedDocument {
    pub path: PathBuf,
}

/// Turns statement markup into a viewable document. The production mobile
/// shell plugs a PDF converter in here; the built-in implementation writes
/// the markup itself.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    async fn render(&self, markup: &str) -> Result<RenderedDocument>;
}

/// Writes each export as `{prefix}-{millis}.html` under the configured
/// directory, creating it on first use.
pub struct HtmlDocumentRenderer {
    directory: PathBuf,
    file_prefix: String,
}

impl HtmlDocumentRenderer {
    pub fn new(config: &ExportConfig) -> Self {
        HtmlDocumentRenderer {
            directory: config.directory.clone(),
            file_prefix: config.file_prefix.clone(),
        }
    }
}

#[async_trait]
impl DocumentRenderer for HtmlDocumentRenderer {
    async fn render(&self, markup: &str) -> Result<RenderedDocument> {
        async_fs::create_dir_all(&self.directory)
            .await
            .map_err(Error::from_export_io)?;

        let filename = format!(
            "{}-{}.html",
            self.file_prefix,
            Timestamp::now().as_millis()
        );
        let path = self.directory.join(filename);

        async_fs::write(&path, markup)
            .await
            .map_err(Error::from_export_io)?;

        tracing::info!(path = %path.display(), bytes = markup.len(), "statement exported");
        Ok(RenderedDocument { path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn temp_export_config() -> (TempDir, ExportConfig) {
        let temp_dir = TempDir::new().unwrap();
        let config = ExportConfig {
            directory: temp_dir.path().join("statements"),
            file_prefix: "khata-mini-statement".to_string(),
        };
        (temp_dir, config)
    }

    #[tokio::test]
    async fn render_writes_the_markup_under_the_prefix() {
        let (_guard, config) = temp_export_config();
        let renderer = HtmlDocumentRenderer::new(&config);

        let document = renderer.render("<table></table>").await.unwrap();
        let written = tokio::fs::read_to_string(&document.path).await.unwrap();
        assert_eq!(written, "<table></table>");

        let filename = document.path.file_name().unwrap().to_string_lossy();
        assert!(filename.starts_with("khata-mini-statement-"));
        assert!(filename.ends_with(".html"));
    }

    #[tokio::test]
    async fn consecutive_renders_never_collide() {
        let (_guard, config) = temp_export_config();
        let renderer = HtmlDocumentRenderer::new(&config);

        let first = renderer.render("a").await.unwrap();
        let second = renderer.render("b").await.unwrap();
        assert_ne!(first.path, second.path);
    }
}
