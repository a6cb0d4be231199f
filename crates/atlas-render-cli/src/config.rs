//! Configuration file support for the atlas-render CLI
//!
//! Loads settings from an `_atlas-render.toml` configuration file.

use anyhow::{Context, Result};
use atlas_render_core::{HtmlOptions, OutputFormat, RenderOptions, TableStyle, TextOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "_atlas-render.toml";

/// Schema URL for the configuration file
pub const SCHEMA_URL: &str = "https://raw.githubusercontent.com/atlasrag/atlas-render/main/crates/atlas-render-cli/schema/atlas-render.schema.json";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Output format configuration
    #[serde(skip_serializing_if = "OutputConfig::is_empty")]
    pub output: OutputConfig,
    /// HTML writer configuration
    #[serde(skip_serializing_if = "HtmlConfig::is_empty")]
    pub html: HtmlConfig,
    /// Plain text writer configuration
    #[serde(skip_serializing_if = "TextConfig::is_empty")]
    pub text: TextConfig,
}

/// Output format configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "html", "text", "json" (content tree) or "blocks" (scanned blocks) (default: "html")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl OutputConfig {
    fn is_empty(&self) -> bool {
        self.format.is_none()
    }
}

/// HTML writer configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct HtmlConfig {
    /// CSS class of a `<div>` wrapped around every table (default: no wrapper)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_wrapper_class: Option<String>,
    /// Add alternating odd/even classes to table body rows (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub striped_rows: Option<bool>,
    /// Write complete HTML documents instead of fragments (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standalone: Option<bool>,
}

impl HtmlConfig {
    fn is_empty(&self) -> bool {
        self.table_wrapper_class.is_none() && self.striped_rows.is_none() && self.standalone.is_none()
    }
}

/// Plain text writer configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct TextConfig {
    /// Table border style: "ascii", "modern", "markdown" or "rounded" (default: "ascii")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_style: Option<String>,
}

impl TextConfig {
    fn is_empty(&self) -> bool {
        self.table_style.is_none()
    }
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Try to load configuration from a directory (looks for `_atlas-render.toml`)
    ///
    /// Returns `Ok(None)` if the config file doesn't exist.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Output format named in the file, if any
    pub fn output_format(&self) -> Result<Option<OutputFormat>> {
        self.output
            .format
            .as_deref()
            .map(|s| s.parse::<OutputFormat>())
            .transpose()
            .context("Invalid [output] format in config")
    }

    /// Writer options described by the file, with defaults for missing fields
    pub fn render_options(&self) -> Result<RenderOptions> {
        let table_style = self
            .text
            .table_style
            .as_deref()
            .map(|s| s.parse::<TableStyle>())
            .transpose()
            .context("Invalid [text] table_style in config")?
            .unwrap_or_default();

        Ok(RenderOptions {
            html: HtmlOptions {
                table_wrapper_class: self.html.table_wrapper_class.clone(),
                striped_rows: self.html.striped_rows.unwrap_or(false),
                standalone: self.html.standalone.unwrap_or(false),
                title: None,
            },
            text: TextOptions { table_style },
        })
    }

    /// Generate JSON schema for the configuration
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Generate JSON schema as a string
    pub fn json_schema_string() -> Result<String> {
        let schema = Self::json_schema();
        serde_json::to_string_pretty(&schema).context("Failed to serialize JSON schema")
    }

    /// Serialize configuration to TOML string with schema directive
    pub fn to_toml_with_schema(&self) -> Result<String> {
        let toml_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        Ok(format!("#:schema {}\n\n{}", SCHEMA_URL, toml_content))
    }

    /// Create a sample configuration with common defaults for `--init`
    pub fn sample() -> Self {
        Config {
            output: OutputConfig {
                format: Some("html".to_string()),
            },
            html: HtmlConfig {
                table_wrapper_class: Some("table-scroll".to_string()),
                striped_rows: Some(true),
                standalone: Some(false),
            },
            text: TextConfig {
                table_style: Some("ascii".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.output.format.is_none());
        assert!(config.html.standalone.is_none());
    }

    #[test]
    fn test_parse_output_section() {
        let config: Config = toml::from_str(
            r#"
            [output]
            format = "text"
            "#,
        )
        .unwrap();

        assert_eq!(config.output.format, Some("text".to_string()));
        assert_eq!(config.output_format().unwrap(), Some(OutputFormat::Text));
    }

    #[test]
    fn test_parse_html_section() {
        let config: Config = toml::from_str(
            r#"
            [html]
            table_wrapper_class = "overflow-x-auto"
            striped_rows = true
            standalone = true
            "#,
        )
        .unwrap();

        let options = config.render_options().unwrap();
        assert_eq!(
            options.html.table_wrapper_class,
            Some("overflow-x-auto".to_string())
        );
        assert!(options.html.striped_rows);
        assert!(options.html.standalone);
    }

    #[test]
    fn test_parse_text_section() {
        let config: Config = toml::from_str(
            r#"
            [text]
            table_style = "rounded"
            "#,
        )
        .unwrap();

        let options = config.render_options().unwrap();
        assert_eq!(options.text.table_style, TableStyle::Rounded);
    }

    #[test]
    fn test_defaults_when_missing() {
        let options = Config::default().render_options().unwrap();
        assert_eq!(options.text.table_style, TableStyle::Ascii);
        assert!(!options.html.striped_rows);
        assert!(options.html.table_wrapper_class.is_none());
        assert_eq!(Config::default().output_format().unwrap(), None);
    }

    #[test]
    fn test_invalid_values() {
        let config: Config = toml::from_str(
            r#"
            [output]
            format = "pdf"

            [text]
            table_style = "fancy"
            "#,
        )
        .unwrap();

        let err = config.output_format().unwrap_err();
        assert!(format!("{:#}", err).contains("Unknown output format: pdf"));
        assert!(config.render_options().is_err());
    }

    #[test]
    fn test_wrong_value_type_is_rejected() {
        let result: Result<Config, _> = toml::from_str(
            r#"
            [html]
            striped_rows = "yes"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_empty_config() {
        let config = Config::default();
        let toml = config.to_toml_with_schema().unwrap();
        assert!(toml.starts_with("#:schema"));
        // Empty config should have minimal content
        assert!(!toml.contains("[output]"));
    }

    #[test]
    fn test_serialize_sample_config() {
        let config = Config::sample();
        let toml = config.to_toml_with_schema().unwrap();
        assert!(toml.starts_with("#:schema"));
        assert!(toml.contains("[html]"));
        assert!(toml.contains("format = \"html\""));
    }

    #[test]
    fn test_json_schema_generation() {
        let schema = Config::json_schema_string().unwrap();
        assert!(schema.contains("\"title\""));
        assert!(schema.contains("HtmlConfig"));
    }

    #[test]
    fn test_roundtrip() {
        let config = Config::sample();
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(config.text.table_style, parsed.text.table_style);
        assert_eq!(config.html.striped_rows, parsed.html.striped_rows);
    }
}
