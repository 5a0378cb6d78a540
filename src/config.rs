use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use contentcraft::DispatchConfig;
use contentcraft::llm::GroqConfig;
use contentcraft::llm::groq::{DEFAULT_MODEL, GROQ_API_BASE, GROQ_API_KEY_ENV};
use contentcraft::tools::GenerationParams;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub selection: SelectionConfig,
    pub generation: GenerationConfig,
    pub dispatch: DispatchSection,
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key_env: String,
    pub model: String,
    pub timeout_ms: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: GROQ_API_BASE.to_string(),
            api_key_env: GROQ_API_KEY_ENV.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub model: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.0,
            max_tokens: 150,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub model: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.7,
            max_tokens: 300,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchSection {
    pub raw_output_on_tool_error: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Tool names left out of the registry
    pub disabled: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            selection: SelectionConfig::default(),
            generation: GenerationConfig::default(),
            dispatch: DispatchSection::default(),
            tools: ToolsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    pub fn groq_config(&self) -> GroqConfig {
        GroqConfig {
            base_url: self.llm.base_url.clone(),
            api_key_env: self.llm.api_key_env.clone(),
            model: self.llm.model.clone(),
            timeout: self.llm.timeout_ms.map(Duration::from_millis),
        }
    }

    pub fn dispatch_config(&self) -> DispatchConfig {
        DispatchConfig {
            model: self.selection.model.clone(),
            temperature: self.selection.temperature,
            max_tokens: self.selection.max_tokens,
            raw_output_on_tool_error: self.dispatch.raw_output_on_tool_error,
        }
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            model: self.generation.model.clone(),
            temperature: self.generation.temperature,
            max_tokens: self.generation.max_tokens,
        }
    }
}
