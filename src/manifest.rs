use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::namespace::TailwindNamespace;
use crate::types::{TokenType, TokenValue};

/// Metadata for the generated report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestMetadata {
    /// Version of the report format
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: DateTime<Utc>,

    /// Number of token files processed
    pub files_processed: usize,

    /// Number of tokens converted
    pub tokens_converted: usize,

    /// Number of tokens skipped
    pub tokens_skipped: usize,

    /// Converter version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converter_version: Option<String>,
}

/// One converted token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestToken {
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// Normalized value
    pub value: TokenValue,

    pub css: String,

    pub scss: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<TailwindNamespace>,

    /// File the token came from
    pub file: String,
}

/// A token that could not be converted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedToken {
    pub path: String,
    pub file: String,
    pub reason: String,
}

/// Statistics about the conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestStatistics {
    /// Converted token count per type
    pub tokens_by_type: IndexMap<String, usize>,

    /// Converted token count per Tailwind namespace
    pub tokens_by_namespace: IndexMap<String, usize>,

    /// Processing time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,
}

/// Complete conversion report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub metadata: ManifestMetadata,

    /// Converted tokens keyed by path, in input order
    pub tokens: IndexMap<String, ManifestToken>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skipped: Vec<SkippedToken>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ManifestStatistics>,
}

impl Manifest {
    /// Create a new report with default metadata
    pub fn new() -> Self {
        Self {
            metadata: ManifestMetadata {
                version: "1.0.0".to_string(),
                generated_at: Utc::now(),
                files_processed: 0,
                tokens_converted: 0,
                tokens_skipped: 0,
                converter_version: Some(env!("CARGO_PKG_VERSION").to_string()),
            },
            tokens: IndexMap::new(),
            skipped: Vec::new(),
            statistics: None,
        }
    }

    /// Add a converted token. The first token seen for a path wins; later
    /// ones are recorded as skipped.
    pub fn add_token(&mut self, path: String, token: ManifestToken) {
        if let Some(existing) = self.tokens.get(&path) {
            let reason = format!("duplicate token path (first defined in {})", existing.file);
            self.add_skipped(SkippedToken {
                path,
                file: token.file,
                reason,
            });
            return;
        }
        self.tokens.insert(path, token);
        self.metadata.tokens_converted = self.tokens.len();
    }

    pub fn add_skipped(&mut self, skipped: SkippedToken) {
        self.skipped.push(skipped);
        self.metadata.tokens_skipped = self.skipped.len();
    }

    /// Calculate and set statistics
    pub fn calculate_statistics(&mut self, processing_time_ms: Option<u64>) {
        let mut tokens_by_type = IndexMap::new();
        let mut tokens_by_namespace = IndexMap::new();
        for token in self.tokens.values() {
            *tokens_by_type.entry(token.token_type.to_string()).or_insert(0) += 1;
            let namespace = token
                .namespace
                .map(|ns| ns.as_str().to_string())
                .unwrap_or_else(|| "none".to_string());
            *tokens_by_namespace.entry(namespace).or_insert(0) += 1;
        }

        self.statistics = Some(ManifestStatistics {
            tokens_by_type,
            tokens_by_namespace,
            processing_time_ms,
        });
    }

    /// Convert report to JSON value
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }

    /// Convert report to pretty JSON string
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Convert report to compact JSON string
    pub fn to_compact_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder pattern for creating reports
pub struct ManifestBuilder {
    manifest: Manifest,
    start_time: Option<std::time::Instant>,
}

impl ManifestBuilder {
    /// Create a new report builder
    pub fn new() -> Self {
        Self {
            manifest: Manifest::new(),
            start_time: Some(std::time::Instant::now()),
        }
    }

    /// Set the number of files processed
    pub fn with_files_processed(mut self, count: usize) -> Self {
        self.manifest.metadata.files_processed = count;
        self
    }

    /// Add converted tokens in order
    pub fn with_tokens(mut self, tokens: impl IntoIterator<Item = (String, ManifestToken)>) -> Self {
        for (path, token) in tokens {
            self.manifest.add_token(path, token);
        }
        self
    }

    /// Add skipped tokens
    pub fn with_skipped(mut self, skipped: impl IntoIterator<Item = SkippedToken>) -> Self {
        for entry in skipped {
            self.manifest.add_skipped(entry);
        }
        self
    }

    /// Build the final report with statistics
    pub fn build(mut self) -> Manifest {
        let processing_time = self.start_time.map(|t| t.elapsed().as_millis() as u64);
        self.manifest.calculate_statistics(processing_time);
        self.manifest
    }
}

impl Default for ManifestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColorValue;

    fn color_token(file: &str) -> ManifestToken {
        ManifestToken {
            token_type: TokenType::Color,
            value: TokenValue::Color(ColorValue::BLACK),
            css: "#000000".to_string(),
            scss: "#000000".to_string(),
            namespace: Some(TailwindNamespace::Color),
            file: file.to_string(),
        }
    }

    #[test]
    fn test_manifest_creation() {
        let manifest = Manifest::new();
        assert_eq!(manifest.metadata.version, "1.0.0");
        assert_eq!(manifest.tokens.len(), 0);
        assert!(manifest.skipped.is_empty());
    }

    #[test]
    fn test_duplicate_paths_are_skipped() {
        let mut manifest = Manifest::new();
        manifest.add_token("color/black".to_string(), color_token("a.json"));
        manifest.add_token("color/black".to_string(), color_token("b.json"));

        assert_eq!(manifest.tokens.len(), 1);
        assert_eq!(manifest.tokens["color/black"].file, "a.json");
        assert_eq!(manifest.metadata.tokens_skipped, 1);
        assert!(manifest.skipped[0].reason.contains("a.json"));
    }

    #[test]
    fn test_manifest_builder_statistics() {
        let mut spacing = color_token("a.json");
        spacing.token_type = TokenType::Dimension;
        spacing.namespace = None;

        let manifest = ManifestBuilder::new()
            .with_files_processed(2)
            .with_tokens(vec![
                ("color/black".to_string(), color_token("a.json")),
                ("color/ink".to_string(), color_token("a.json")),
                ("ratio".to_string(), spacing),
            ])
            .build();

        assert_eq!(manifest.metadata.files_processed, 2);
        assert_eq!(manifest.metadata.tokens_converted, 3);
        let stats = manifest.statistics.unwrap();
        assert_eq!(stats.tokens_by_type["color"], 2);
        assert_eq!(stats.tokens_by_type["dimension"], 1);
        assert_eq!(stats.tokens_by_namespace["none"], 1);
    }

    #[test]
    fn test_json_serialization() {
        let mut manifest = Manifest::new();
        manifest.add_token("color/black".to_string(), color_token("a.json"));
        let json = manifest.to_json();

        assert_eq!(json["metadata"]["version"], "1.0.0");
        assert_eq!(json["tokens"]["color/black"]["type"], "color");
        assert_eq!(json["tokens"]["color/black"]["namespace"], "color");
        assert!(json.get("skipped").is_none());
    }
}
