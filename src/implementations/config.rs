use log::{ debug, info, warn };
use serde::{ Deserialize, Serialize };
use std::fs;
use std::path::{ Path, PathBuf };
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Missing required API key: {0}")]
    MissingApiKey(String),
}

/// Chat model providers the HTTP client knows how to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAI,
    #[serde(alias = "claude")]
    Anthropic,
}

impl Provider {
    pub fn env_var(&self) -> &'static str {
        match self {
            Provider::OpenAI => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Provider::OpenAI => "https://api.openai.com/v1/chat/completions",
            Provider::Anthropic => "https://api.anthropic.com/v1/messages",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAI => "gpt-4o",
            Provider::Anthropic => "claude-3-5-sonnet-latest",
        }
    }

    pub fn default_max_tokens(&self) -> usize {
        match self {
            Provider::OpenAI => 16384,
            Provider::Anthropic => 8192,
        }
    }

    fn all() -> [Provider; 2] {
        [Provider::OpenAI, Provider::Anthropic]
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    /// Provider (openai, anthropic); unset lets the key lookup pick one
    pub provider: Option<Provider>,

    /// API key for LLM service
    pub api_key: Option<String>,

    /// API endpoint for LLM service
    pub api_endpoint: Option<String>,

    /// API model to use
    pub model: Option<String>,

    /// API organization ID (if applicable)
    pub organization_id: Option<String>,
}

/// Persona and rule list for one of the two agents
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AgentProfile {
    pub name: String,
    pub description: String,
    pub instructions: Vec<String>,
}

/// Where an accepted game is written
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub games_dir: PathBuf,
    pub file_name: String,
}

impl OutputConfig {
    pub fn output_path(&self) -> PathBuf {
        self.games_dir.join(&self.file_name)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            games_dir: PathBuf::from("games"),
            file_name: "pong-game.html".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Configuration for the chat model used by both agents
    pub llm_api: ApiConfig,

    /// Maximum tokens for API calls, provider default when unset
    pub max_tokens: Option<usize>,

    /// Temperature for generation (0.0-1.0)
    pub temperature: Option<f32>,

    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,

    /// Game developer agent
    pub developer: AgentProfile,

    /// QA agent
    pub reviewer: AgentProfile,

    pub output: OutputConfig,
}

impl GeneratorConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML; omitted sections keep their defaults
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig = serde_yaml::from_str(contents)?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// The provider named in the config, or OpenAI when none is set
    pub fn preferred_provider(&self) -> Provider {
        self.llm_api.provider.unwrap_or(Provider::OpenAI)
    }

    /// Get the API key, checking environment variables if not in config
    pub fn get_api_key(&self) -> Result<(Provider, String), ConfigError> {
        self.get_api_key_with(|var| std::env::var(var).ok())
    }

    /// Resolve the provider and API key, reading variables through `lookup`.
    ///
    /// A key in the config wins. Otherwise the preferred provider's variable is
    /// read, and when no provider is pinned in the config the remaining
    /// providers are tried in order.
    pub fn get_api_key_with<F>(&self, lookup: F) -> Result<(Provider, String), ConfigError>
        where F: Fn(&str) -> Option<String>
    {
        let preferred = self.preferred_provider();

        if let Some(api_key) = &self.llm_api.api_key {
            debug!("Using API key from config");
            return Ok((preferred, api_key.clone()));
        }

        if let Some(key) = lookup(preferred.env_var()) {
            info!("Using preferred provider: {:?}", preferred);
            return Ok((preferred, key));
        }

        if self.llm_api.provider.is_some() {
            return Err(
                ConfigError::MissingApiKey(
                    format!("set {} or llm_api.api_key (provider {:?} is pinned)", preferred.env_var(), preferred)
                )
            );
        }
        debug!("Preferred provider {:?} not available, trying others", preferred);

        for provider in Provider::all() {
            if provider == preferred {
                continue;
            }
            match lookup(provider.env_var()) {
                Some(key) => {
                    info!("Using alternative provider: {:?} (preferred was {:?})", provider, preferred);
                    return Ok((provider, key));
                }
                None => debug!("Provider {:?} not available", provider),
            }
        }

        let tried: Vec<&str> = Provider::all()
            .iter()
            .map(|p| p.env_var())
            .collect();
        Err(ConfigError::MissingApiKey(format!("set one of {} or llm_api.api_key", tried.join(", "))))
    }

    /// Endpoint for the resolved provider.
    ///
    /// The configured override belongs to the preferred provider and is
    /// dropped when the key lookup fell back to another one.
    pub fn endpoint_for(&self, provider: Provider) -> String {
        match &self.llm_api.api_endpoint {
            Some(endpoint) if provider == self.preferred_provider() => endpoint.clone(),
            Some(endpoint) => {
                warn!(
                    "Ignoring api_endpoint {} configured for {:?}; using the {:?} default",
                    endpoint,
                    self.preferred_provider(),
                    provider
                );
                provider.default_endpoint().to_string()
            }
            None => provider.default_endpoint().to_string(),
        }
    }

    /// Model for the resolved provider, with the same fallback rule as `endpoint_for`
    pub fn model_for(&self, provider: Provider) -> String {
        match &self.llm_api.model {
            Some(model) if provider == self.preferred_provider() => model.clone(),
            Some(model) => {
                warn!(
                    "Ignoring model {} configured for {:?}; using the {:?} default",
                    model,
                    self.preferred_provider(),
                    provider
                );
                provider.default_model().to_string()
            }
            None => provider.default_model().to_string(),
        }
    }
}

/// Default configuration
impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            llm_api: ApiConfig {
                provider: None,
                api_key: None,
                api_endpoint: None,
                model: None,
                organization_id: None,
            },
            max_tokens: None,
            temperature: Some(0.2),
            timeout_secs: Some(120),
            developer: default_developer_profile(),
            reviewer: default_reviewer_profile(),
            output: OutputConfig::default(),
        }
    }
}

fn lines(items: &[&str]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn default_developer_profile() -> AgentProfile {
    AgentProfile {
        name: "Game Developer Agent".to_string(),
        description: "You generate a fully working HTML5 Pong game.".to_string(),
        instructions: lines(
            &[
                "Create a PONG game based on the user's prompt.",
                "The game must be pure HTML5 + JS + Canvas (single file).",
                "No external scripts, files, images, or libraries.",
                "Gameplay MUST be realistic:",
                " - Player paddle uses acceleration, friction, momentum.",
                " - Player movement is smooth, not instant.",
                " - AI movement is predictive with delayed reaction (not robotic).",
                " - Ball uses angle-based bouncing based on paddle hit position.",
                " - Ball gradually increases speed during play.",
                " - Movement and collisions must feel fluid and natural.",
                "Add a Speed Level Picker (Easy / Medium / Hard) below the Reset button.",
                "Speed affects:",
                " - ball initial velocity",
                " - ball acceleration per hit",
                " - max ball speed",
                " - AI reaction speed",
                "Game must start when SPACE is pressed.",
                "Player uses W/S to move the left paddle.",
                "Right paddle is controlled by realistic AI.",
                "Display a large score at the top and a 'current score' HUD under the canvas.",
                "Reset button must fully reset match scores, paddle positions, ball movement, state, and speed settings.",
                "Game ends at 10 points.",
                "On loss, use alert() and offer restart/exit.",
                "Embed clear instructions on the HTML page.",
                "Canvas must be large (minimum 900px width).",
                "Colors must be user-friendly and readable.",
                "Code must run standalone when opening the HTML file.",
                "Return ONLY the fields defined in the output schema.",
            ]
        ),
    }
}

pub fn default_reviewer_profile() -> AgentProfile {
    AgentProfile {
        name: "QA Agent".to_string(),
        description: "Evaluate HTML5 Pong code for correctness.".to_string(),
        instructions: lines(
            &[
                "Verify the HTML5 code is valid and runnable.",
                "Verify the UI layout remains IDENTICAL to the previous version:",
                " - same wrapper layout",
                " - same HUD",
                " - same reset button placement",
                " - same instructions section",
                " - same general appearance and structure",
                "Only permitted additions: speed selector + logic updates.",
                "Verify paddle movement is realistic (acceleration, friction, momentum).",
                "Verify AI movement is smoothed, predictive, non-instant.",
                "Verify ball physics include angle reflections and speed growth.",
                "Verify movement is fluid (no stiff or instant movement).",
                "Verify speed picker (Easy/Medium/Hard) exists and impacts gameplay:",
                " - initial ball speed",
                " - acceleration curve",
                " - AI difficulty",
                "Verify reset button resets ALL state cleanly.",
                "Verify instruction text is on the page.",
                "Verify scoring system is correct and visible.",
                "Verify alert() triggers on loss and restart works.",
                "Verify game is pure HTML5+JS with no external dependencies.",
                "If EVERYTHING meets requirements, return correct=true.",
                "If ANY realism requirement or UI-structure requirement fails, return correct=false.",
            ]
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = GeneratorConfig::default();
        assert_eq!(config.preferred_provider(), Provider::OpenAI);
        assert_eq!(config.model_for(Provider::OpenAI), "gpt-4o");
        assert_eq!(config.endpoint_for(Provider::OpenAI), "https://api.openai.com/v1/chat/completions");
        assert_eq!(config.output.output_path(), PathBuf::from("games").join("pong-game.html"));
        assert_eq!(config.developer.name, "Game Developer Agent");
        assert!(config.reviewer.instructions.iter().any(|i| i.contains("correct=false")));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
llm_api:
  provider: anthropic
  api_key: sk-test
output:
  games_dir: /tmp/out
  file_name: breakout.html
"#;
        let config = GeneratorConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.preferred_provider(), Provider::Anthropic);
        assert_eq!(config.model_for(Provider::Anthropic), "claude-3-5-sonnet-latest");
        assert_eq!(config.output.output_path(), PathBuf::from("/tmp/out/breakout.html"));
        assert_eq!(config.developer, default_developer_profile());
        assert_eq!(config.temperature, Some(0.2));
    }

    #[test]
    fn test_yaml_round_trip_of_defaults() {
        let mut config = GeneratorConfig::default();
        config.llm_api.provider = Some(Provider::Anthropic);
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("provider: anthropic"));
        let parsed = GeneratorConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.llm_api.provider, Some(Provider::Anthropic));
        assert_eq!(parsed.reviewer, default_reviewer_profile());
        assert_eq!(parsed.max_tokens, None);
        assert_eq!(parsed.timeout_secs, Some(120));
    }

    #[test]
    fn test_api_key_from_config_wins() {
        let mut config = GeneratorConfig::default();
        config.llm_api.api_key = Some("sk-config".to_string());
        let (provider, key) = config.get_api_key().unwrap();
        assert_eq!(provider, Provider::OpenAI);
        assert_eq!(key, "sk-config");
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let yaml = "llm_api:\n  provider: mystery\n";
        assert!(matches!(GeneratorConfig::from_yaml(yaml), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_claude_alias_selects_anthropic() {
        let config = GeneratorConfig::from_yaml("llm_api:\n  provider: claude\n").unwrap();
        assert_eq!(config.llm_api.provider, Some(Provider::Anthropic));
    }

    fn env_with(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: Vec<(String, String)> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    #[test]
    fn test_api_key_from_preferred_env_var() {
        let config = GeneratorConfig::default();
        let lookup = env_with(&[("OPENAI_API_KEY", "sk-openai"), ("ANTHROPIC_API_KEY", "sk-ant")]);
        let (provider, key) = config.get_api_key_with(lookup).unwrap();
        assert_eq!(provider, Provider::OpenAI);
        assert_eq!(key, "sk-openai");
    }

    #[test]
    fn test_api_key_falls_back_when_provider_unset() {
        let config = GeneratorConfig::default();
        let (provider, key) = config.get_api_key_with(env_with(&[("ANTHROPIC_API_KEY", "sk-ant")])).unwrap();
        assert_eq!(provider, Provider::Anthropic);
        assert_eq!(key, "sk-ant");
        assert_eq!(config.model_for(provider), "claude-3-5-sonnet-latest");
        assert_eq!(config.endpoint_for(provider), "https://api.anthropic.com/v1/messages");
    }

    #[test]
    fn test_pinned_provider_does_not_fall_back() {
        let mut config = GeneratorConfig::default();
        config.llm_api.provider = Some(Provider::OpenAI);
        let result = config.get_api_key_with(env_with(&[("ANTHROPIC_API_KEY", "sk-ant")]));
        assert!(matches!(result, Err(ConfigError::MissingApiKey(_))));
    }

    #[test]
    fn test_no_keys_anywhere_is_missing() {
        let config = GeneratorConfig::default();
        let result = config.get_api_key_with(env_with(&[]));
        assert!(matches!(result, Err(ConfigError::MissingApiKey(_))));
    }

    #[test]
    fn test_overrides_dropped_after_fallback() {
        let mut config = GeneratorConfig::default();
        config.llm_api.model = Some("gpt-4o-mini".to_string());
        config.llm_api.api_endpoint = Some("http://localhost:8080/v1/chat/completions".to_string());

        let (provider, _) = config.get_api_key_with(env_with(&[("ANTHROPIC_API_KEY", "sk-ant")])).unwrap();
        assert_eq!(provider, Provider::Anthropic);
        assert_eq!(config.model_for(provider), "claude-3-5-sonnet-latest");
        assert_eq!(config.endpoint_for(provider), "https://api.anthropic.com/v1/messages");

        assert_eq!(config.model_for(Provider::OpenAI), "gpt-4o-mini");
        assert_eq!(config.endpoint_for(Provider::OpenAI), "http://localhost:8080/v1/chat/completions");
    }
}
