use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_parsed<T: std::str::FromStr>(profile: &str, key: &str) -> Option<T> {
    let raw = profiled_env_opt(profile, key)?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("Ignoring unparsable value for {}: {:?}", key, raw);
            None
        }
    }
}

// ── Top-level config ──────────────────────────────────────────

/// Default model identifier for quiz and summary generation.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub llm: LlmConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `PDFQUIZ_PROFILE`. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("PDFQUIZ_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            server: ServerConfig::from_env_profiled(p),
            llm: LlmConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  server:  {}:{} (upload limit {} bytes)", self.server.host, self.server.port, self.server.upload_max_bytes);
        tracing::info!(
            "  llm:     provider={}, model={}, api_key={}",
            self.llm.provider,
            self.llm.gemini_model,
            if self.llm.gemini_api_key.is_some() { "set" } else { "(missing)" }
        );
    }

    /// Return a redacted view safe for API responses (no secrets).
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "server": {
                "host": self.server.host,
                "port": self.server.port,
                "upload_max_bytes": self.server.upload_max_bytes,
                "session_idle_secs": self.server.session_idle_secs,
            },
            "llm": {
                "provider": self.llm.provider,
                "model": self.llm.gemini_model,
                "configured": self.llm.is_configured(),
            },
        })
    }
}

// ── Server ────────────────────────────────────────────────────

pub const DEFAULT_SESSION_IDLE_SECS: u64 = 2 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    /// Largest accepted upload body.
    pub upload_max_bytes: usize,
    /// Sessions unused this long are dropped. 0 keeps them forever.
    pub session_idle_secs: u64,
}

impl ServerConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            host: profiled_env_or(p, "HOST", "0.0.0.0"),
            port: profiled_env_parsed(p, "PORT").unwrap_or(3001),
            cors_origin: profiled_env_or(p, "CORS_ORIGIN", "*"),
            upload_max_bytes: profiled_env_parsed(p, "UPLOAD_MAX_BYTES").unwrap_or(50 * 1024 * 1024),
            session_idle_secs: profiled_env_parsed(p, "SESSION_IDLE_SECS").unwrap_or(DEFAULT_SESSION_IDLE_SECS),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3001,
            cors_origin: "*".into(),
            upload_max_bytes: 50 * 1024 * 1024,
            session_idle_secs: DEFAULT_SESSION_IDLE_SECS,
        }
    }
}

// ── LLM (Gemini) ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Only "gemini" is supported.
    pub provider: String,
    #[serde(skip_serializing)]
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// Unset means the service default is used.
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl LlmConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            provider: profiled_env_or(p, "LLM_PROVIDER", "gemini").to_lowercase(),
            gemini_api_key: profiled_env_opt(p, "GEMINI_API_KEY"),
            gemini_model: profiled_env_or(p, "GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            gemini_base_url: profiled_env_or(p, "GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            temperature: profiled_env_parsed(p, "LLM_TEMPERATURE"),
            max_tokens: profiled_env_parsed(p, "LLM_MAX_TOKENS"),
        }
    }

    pub fn is_configured(&self) -> bool {
        match self.provider.as_str() {
            "gemini" | "google" => self.gemini_api_key.is_some(),
            _ => false,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".into(),
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.into(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.into(),
            temperature: None,
            max_tokens: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_api_key() {
        let cfg = LlmConfig::default();
        assert_eq!(cfg.gemini_model, DEFAULT_GEMINI_MODEL);
        assert!(!cfg.is_configured());
    }

    #[test]
    fn test_unknown_provider_is_not_configured() {
        let cfg = LlmConfig {
            provider: "openai".into(),
            gemini_api_key: Some("k".into()),
            ..LlmConfig::default()
        };
        assert!(!cfg.is_configured());
    }

    #[test]
    fn test_redacted_summary_hides_key() {
        let cfg = Config {
            profile: String::new(),
            server: ServerConfig::default(),
            llm: LlmConfig {
                gemini_api_key: Some("super-secret".into()),
                ..LlmConfig::default()
            },
        };
        let summary = cfg.redacted_summary().to_string();
        assert!(!summary.contains("super-secret"));
        assert_eq!(cfg.redacted_summary()["profile"], "default");
        assert_eq!(cfg.redacted_summary()["llm"]["configured"], true);
        assert_eq!(
            cfg.redacted_summary()["server"]["session_idle_secs"],
            DEFAULT_SESSION_IDLE_SECS
        );
    }

    #[test]
    fn test_serialized_config_skips_key() {
        let cfg = LlmConfig {
            gemini_api_key: Some("super-secret".into()),
            ..LlmConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(!json.contains("super-secret"));
    }
}
