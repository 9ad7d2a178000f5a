use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level config (hermit.toml + HERMIT_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HermitConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

/// Where the session keeps its durable files.
///
/// Everything lives under `data_dir`: the allow-list, the saved-messages
/// file and the transport credential blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl SessionConfig {
    pub fn allow_file(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("chat-names.json")
    }

    pub fn saved_file(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("pinned.txt")
    }

    pub fn credentials_file(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("auth.json")
    }
}

/// Reply-generator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Optional path to a persona/system prompt file. Falls back to a short
    /// built-in prompt when unset or unreadable.
    pub persona_path: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            persona_path: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    pub openai: Option<OpenAiProviderConfig>,
}

/// Any OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiProviderConfig {
    pub api_key: String,
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
}

fn default_model() -> String {
    "qwen/qwen-32b".to_string()
}

fn default_max_tokens() -> u32 {
    1600
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_data_dir() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.hermit", home)
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.hermit/hermit.toml", home)
}

impl HermitConfig {
    /// Load config from a TOML file with HERMIT_* env var overrides.
    ///
    /// Checks in order: explicit path argument, then `~/.hermit/hermit.toml`.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: HermitConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("HERMIT_").split("_"))
            .extract()
            .map_err(|e| crate::error::HermitError::Config(e.to_string()))?;

        Ok(config)
    }
}
