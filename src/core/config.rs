use std::env;
use std::time::Duration;

use crate::conversation::HistoryScope;

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

/// Which hosted text-generation API answers prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmProvider {
    Gemini {
        api_key: String,
        model: String,
    },
    OpenAi {
        api_key: String,
        org_id: Option<String>,
        model: String,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub discord_token: String,
    pub llm: LlmProvider,
    pub history_scope: HistoryScope,
    pub history_max_keys: Option<usize>,
    pub llm_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| format!("{}: environment variable not found", key))
        };

        let discord_token = required("DISCORD_TOKEN")?;

        let provider = lookup("LLM_PROVIDER").unwrap_or_else(|| "gemini".to_string());
        let llm = match provider.trim().to_ascii_lowercase().as_str() {
            "gemini" => LlmProvider::Gemini {
                api_key: required("GEMINI_API_KEY")?,
                model: lookup("GEMINI_MODEL")
                    .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            },
            "openai" => LlmProvider::OpenAi {
                api_key: required("OPENAI_API_KEY")?,
                org_id: lookup("OPENAI_ORG_ID"),
                model: lookup("OPENAI_MODEL")
                    .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            },
            other => return Err(format!("LLM_PROVIDER: unknown provider '{}'", other)),
        };

        let history_scope = match lookup("HISTORY_SCOPE") {
            None => HistoryScope::PerUserChannel,
            Some(raw) => raw
                .parse()
                .map_err(|e| format!("HISTORY_SCOPE: {}", e))?,
        };

        let history_max_keys = lookup("HISTORY_MAX_KEYS")
            .map(|raw| {
                raw.trim()
                    .parse::<usize>()
                    .map_err(|e| format!("HISTORY_MAX_KEYS: {}", e))
            })
            .transpose()?
            .filter(|&n| n > 0);

        let timeout_secs = lookup("LLM_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| format!("LLM_TIMEOUT_SECS: {}", e))
            })
            .transpose()?
            .unwrap_or(DEFAULT_LLM_TIMEOUT_SECS);

        Ok(Self {
            discord_token,
            llm,
            history_scope,
            history_max_keys,
            llm_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
