use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub store: StoreConfig,
    pub firestore: FirestoreConfig,
    pub collections: CollectionsConfig,
    pub recommendation: RecommendationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Firestore,
    Snapshot,
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "firestore" => Ok(StoreBackend::Firestore),
            "snapshot" => Ok(StoreBackend::Snapshot),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// JSON file with `searches`, `views` and `courses` arrays
    pub snapshot_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub database: String,
    /// `host:port` of a local emulator; requests then skip authentication
    pub emulator_host: Option<String>,
    pub access_token: Option<String>,
    pub page_size: u32,
    pub timeout_secs: u64,
}

impl FirestoreConfig {
    pub fn base_url(&self) -> String {
        match &self.emulator_host {
            Some(host) => format!("http://{}/v1", host),
            None => "https://firestore.googleapis.com/v1".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionsConfig {
    pub searches: String,
    pub views: String,
    pub courses: String,
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            searches: "user_searches".to_string(),
            views: "user_course_views".to_string(),
            courses: "courses".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RecommendationConfig {
    pub default_num_recommendations: i64,
    /// How many ranked search rows are turned into similar users
    pub similar_user_window: usize,
    /// How many top-ranked rows are skipped before the window starts
    pub similar_user_skip: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            default_num_recommendations: 5,
            similar_user_window: 5,
            similar_user_skip: 1,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend_raw = get("STORE_BACKEND").unwrap_or_else(|| "firestore".to_string());
        let backend: StoreBackend = backend_raw.parse().map_err(|_| ConfigError::Invalid {
            key: "STORE_BACKEND",
            value: backend_raw.clone(),
        })?;

        let store = StoreConfig {
            backend,
            snapshot_path: get("SNAPSHOT_PATH"),
        };
        if store.backend == StoreBackend::Snapshot && store.snapshot_path.is_none() {
            return Err(ConfigError::Missing("SNAPSHOT_PATH"));
        }

        let project_id = match (store.backend, get("FIRESTORE_PROJECT_ID")) {
            (_, Some(id)) => id,
            (StoreBackend::Firestore, None) => {
                return Err(ConfigError::Missing("FIRESTORE_PROJECT_ID"))
            }
            (StoreBackend::Snapshot, None) => String::new(),
        };

        let defaults = RecommendationConfig::default();
        let collections = CollectionsConfig::default();

        Ok(Config {
            app: AppConfig {
                env: get("APP_ENV").unwrap_or_else(|| "development".to_string()),
                host: get("APP_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(&get, "APP_PORT", 5000)?,
                log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            },
            store,
            firestore: FirestoreConfig {
                project_id,
                database: get("FIRESTORE_DATABASE").unwrap_or_else(|| "(default)".to_string()),
                emulator_host: get("FIRESTORE_EMULATOR_HOST"),
                access_token: get("FIRESTORE_ACCESS_TOKEN"),
                page_size: parse_or(&get, "FIRESTORE_PAGE_SIZE", 300)?,
                timeout_secs: parse_or(&get, "FIRESTORE_TIMEOUT_SECS", 30)?,
            },
            collections: CollectionsConfig {
                searches: get("SEARCHES_COLLECTION").unwrap_or(collections.searches),
                views: get("VIEWS_COLLECTION").unwrap_or(collections.views),
                courses: get("COURSES_COLLECTION").unwrap_or(collections.courses),
            },
            recommendation: RecommendationConfig {
                default_num_recommendations: parse_or(
                    &get,
                    "DEFAULT_NUM_RECOMMENDATIONS",
                    defaults.default_num_recommendations,
                )?,
                similar_user_window: parse_or(
                    &get,
                    "SIMILAR_USER_WINDOW",
                    defaults.similar_user_window,
                )?,
                similar_user_skip: parse_or(&get, "SIMILAR_USER_SKIP", defaults.similar_user_skip)?,
            },
        })
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}
