use crate::domain::content::{default_topics, ShowProfile};
use crate::domain::feed::FeedChannel;
use crate::domain::script::{PhoneticRules, DEFAULT_DELIMITER};
use crate::domain::tts::{SpeakerVoice, VoiceAssignment};
use crate::infrastructure::gemini::DEFAULT_API_BASE;
use crate::infrastructure::repositories::{DEFAULT_TEXT_MODEL, DEFAULT_TTS_MODEL};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_PHONETIC_RULES: &str = "Sundaram=>Suun-duh-ruhm;Labs=>Labbz";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    pub trigger_mode: TriggerMode,
    /// `IS_TEST`: run the diagnostic broadcast instead of a real one
    pub diagnostic: bool,
    pub trigger_token: Option<String>,
    // Gemini
    pub gemini_api_key: String,
    pub gemini_api_base: String,
    pub gemini_text_model: String,
    pub gemini_tts_model: String,
    pub gemini_request_timeout: Duration,
    // Publishing
    pub publish_base_url: String,
    pub data_dir: PathBuf,
    pub audio_dir: PathBuf,
    pub work_dir: PathBuf,
    pub ffmpeg_path: String,
    // Pipeline
    pub pipeline: PipelineSettings,
    pub run_timeout: Option<Duration>,
    pub segment_delimiter: String,
    pub phonetic_rules: PhoneticRules,
    pub voices: VoiceAssignment,
    pub research_topics: Vec<String>,
    /// Recent episodes whose headlines research must not repeat
    pub exclusion_window: usize,
    pub show_title: String,
    pub show_profile: ShowProfile,
    pub feed_channel: FeedChannel,
}

/// Tunables of the chunking, synthesis and history stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    pub max_chunk_length: usize,
    pub min_fragment_length: usize,
    /// Total attempts per segment, first call included
    pub max_retry_attempts: u32,
    pub base_backoff_delay: Duration,
    pub inter_segment_delay: Duration,
    pub history_cap: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_chunk_length: 1000,
            min_fragment_length: 5,
            max_retry_attempts: 4,
            base_backoff_delay: Duration::from_millis(1000),
            inter_segment_delay: Duration::from_millis(200),
            history_cap: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// How a broadcast gets triggered
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    /// Run one broadcast and exit
    Once,
    /// Serve the HTTP trigger hook
    Serve,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let diagnostic = env_flag("IS_TEST");
        let data_dir = PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| ".".to_string()));

        let gemini_api_key = match env::var("GEMINI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            // diagnostic runs never call the remote service
            _ if diagnostic => String::new(),
            _ => return Err("GEMINI_API_KEY must be set unless IS_TEST=true".into()),
        };

        let publish_base_url = publish_base_url(
            env::var("PUBLISH_BASE_URL").ok().as_deref(),
            env::var("GITHUB_REPOSITORY").ok().as_deref(),
        )?;

        let defaults = PipelineSettings::default();
        let pipeline = PipelineSettings {
            max_chunk_length: env_parse("MAX_CHUNK_LENGTH", defaults.max_chunk_length)?,
            min_fragment_length: env_parse("MIN_FRAGMENT_LENGTH", defaults.min_fragment_length)?,
            max_retry_attempts: env_parse("MAX_RETRY_ATTEMPTS", defaults.max_retry_attempts)?,
            base_backoff_delay: Duration::from_millis(env_parse("BASE_BACKOFF_MS", 1000u64)?),
            inter_segment_delay: Duration::from_millis(env_parse("INTER_SEGMENT_DELAY_MS", 200u64)?),
            history_cap: env_parse("HISTORY_CAP", defaults.history_cap)?,
        };
        if pipeline.max_chunk_length == 0 || pipeline.max_retry_attempts == 0 || pipeline.history_cap == 0 {
            return Err("MAX_CHUNK_LENGTH, MAX_RETRY_ATTEMPTS and HISTORY_CAP must be positive".into());
        }

        let segment_delimiter =
            env::var("SEGMENT_DELIMITER").unwrap_or_else(|_| DEFAULT_DELIMITER.to_string());
        if segment_delimiter.trim().is_empty() {
            return Err("SEGMENT_DELIMITER must not be empty".into());
        }

        let voices = VoiceAssignment::new(
            SpeakerVoice::new(
                env::var("HOST_SPEAKER").unwrap_or_else(|_| "Alex".to_string()),
                env::var("HOST_VOICE").unwrap_or_else(|_| "Kore".to_string()),
            ),
            SpeakerVoice::new(
                env::var("CO_HOST_SPEAKER").unwrap_or_else(|_| "Marcus".to_string()),
                env::var("CO_HOST_VOICE").unwrap_or_else(|_| "Puck".to_string()),
            ),
        );

        let defaults = ShowProfile::default();
        let show_profile = ShowProfile {
            show_name: env::var("SHOW_NAME").unwrap_or(defaults.show_name),
            host: voices.host.speaker.clone(),
            co_host: voices.co_host.speaker.clone(),
            sign_off: env::var("SHOW_SIGN_OFF").unwrap_or(defaults.sign_off),
            delimiter: segment_delimiter.clone(),
        };

        let defaults = FeedChannel::default();
        let feed_channel = FeedChannel {
            title: env::var("FEED_TITLE").unwrap_or(defaults.title),
            author: env::var("FEED_AUTHOR").unwrap_or(defaults.author),
            owner_email: env::var("FEED_OWNER_EMAIL").unwrap_or(defaults.owner_email),
            ..defaults
        };

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            trigger_mode: match env::var("RUN_MODE").as_deref() {
                Ok("serve") => TriggerMode::Serve,
                Ok("once") | Err(_) => TriggerMode::Once,
                Ok(other) => return Err(format!("RUN_MODE must be once or serve, got {}", other).into()),
            },
            diagnostic,
            trigger_token: env::var("TRIGGER_TOKEN").ok().filter(|t| !t.is_empty()),
            gemini_api_key,
            gemini_api_base: env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            gemini_text_model: env::var("GEMINI_TEXT_MODEL")
                .unwrap_or_else(|_| DEFAULT_TEXT_MODEL.to_string()),
            gemini_tts_model: env::var("GEMINI_TTS_MODEL")
                .unwrap_or_else(|_| DEFAULT_TTS_MODEL.to_string()),
            gemini_request_timeout: Duration::from_secs(env_parse("GEMINI_TIMEOUT_SECS", 120u64)?),
            publish_base_url,
            audio_dir: env::var("AUDIO_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| data_dir.join("audio")),
            work_dir: env::var("WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir().join("pulsecast")),
            data_dir,
            ffmpeg_path: env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string()),
            pipeline,
            run_timeout: match env_parse("RUN_TIMEOUT_SECS", 0u64)? {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            phonetic_rules: PhoneticRules::parse(
                &env::var("PHONETIC_RULES").unwrap_or_else(|_| DEFAULT_PHONETIC_RULES.to_string()),
            )?,
            segment_delimiter,
            voices,
            research_topics: match env::var("RESEARCH_TOPICS") {
                Ok(topics) => split_list(&topics),
                Err(_) => default_topics(),
            },
            exclusion_window: env_parse("RESEARCH_EXCLUSION_EPISODES", 5usize)?,
            show_title: env::var("SHOW_TITLE").unwrap_or_else(|_| "AI Pulse".to_string()),
            show_profile,
            feed_channel,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join("episodes.json")
    }

    pub fn feed_path(&self) -> PathBuf {
        self.data_dir.join("feed.xml")
    }
}

/// Explicit base URL wins; otherwise a GitHub Pages URL is derived from
/// `owner/repo`
pub fn publish_base_url(
    explicit: Option<&str>,
    github_repository: Option<&str>,
) -> Result<String, String> {
    if let Some(url) = explicit.map(str::trim).filter(|u| !u.is_empty()) {
        return Ok(url.trim_end_matches('/').to_string());
    }

    let repository = github_repository
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or("PUBLISH_BASE_URL or GITHUB_REPOSITORY must be set")?;

    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok(format!("https://{}.github.io/{}", owner, repo))
        }
        _ => Err(format!(
            "GITHUB_REPOSITORY must look like owner/repo, got {}",
            repository
        )),
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key)
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn env_parse<T>(key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| format!("invalid {}={}: {}", key, raw, e)),
        Err(_) => Ok(default),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
