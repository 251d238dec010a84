use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const CONFIG_FILE: &str = "lead_loader.toml";

const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
const DEFAULT_API_BASE: &str = "/api";
const DEFAULT_WORKFLOW_NAME: &str = "dsilaslogicapp";
const DEFAULT_REVIEW_LINK: &str = "https://microsoftapc-my.sharepoint.com/personal/ramganeshvj_microsoft_com/Lists/DSILead%20Allocation%20System/AllItems.aspx";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub server_url: String,
    pub api_base: String,
    pub workflow_name: String,
    pub review_link: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            workflow_name: DEFAULT_WORKFLOW_NAME.to_string(),
            review_link: DEFAULT_REVIEW_LINK.to_string(),
        }
    }
}

/// Keys accepted in `lead_loader.toml`. Anything else is ignored.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    server_url: Option<String>,
    api_base: Option<String>,
    workflow_name: Option<String>,
    review_link: Option<String>,
}

impl LoaderConfig {
    pub fn upload_url(&self) -> String {
        format!("{}{}/upload", self.server_url, self.api_base)
    }

    pub fn status_url(&self) -> String {
        format!(
            "{}{}/logicapp-status/{}",
            self.server_url, self.api_base, self.workflow_name
        )
    }

    fn apply(&mut self, overrides: FileConfig) {
        if let Some(v) = overrides.server_url {
            self.server_url = normalize_server_url(&v);
        }
        if let Some(v) = overrides.api_base {
            self.api_base = normalize_api_base(&v);
        }
        if let Some(v) = overrides.workflow_name {
            if is_valid_workflow_name(&v) {
                self.workflow_name = v;
            } else {
                warn!(workflow = %v, "ignoring workflow name with unsupported characters");
            }
        }
        if let Some(v) = overrides.review_link {
            self.review_link = v;
        }
    }
}

/// Defaults, then `lead_loader.toml` in the working directory, then
/// `LEAD_LOADER_*` environment variables.
pub fn load_config() -> LoaderConfig {
    let mut config = LoaderConfig::default();
    if let Some(file_cfg) = read_config_file(Path::new(CONFIG_FILE)) {
        config.apply(file_cfg);
    }
    config.apply(env_overrides(|key| std::env::var(key).ok()));

    info!(
        upload_url = %config.upload_url(),
        status_url = %config.status_url(),
        "configuration loaded"
    );
    config
}

fn read_config_file(path: &Path) -> Option<FileConfig> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read config file");
            return None;
        }
    };

    match toml::from_str::<FileConfig>(&raw) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
            None
        }
    }
}

fn env_overrides(lookup: impl Fn(&str) -> Option<String>) -> FileConfig {
    FileConfig {
        server_url: lookup("LEAD_LOADER_SERVER_URL"),
        api_base: lookup("LEAD_LOADER_API_BASE"),
        workflow_name: lookup("LEAD_LOADER_WORKFLOW"),
        review_link: lookup("LEAD_LOADER_REVIEW_LINK"),
    }
}

fn normalize_server_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn normalize_api_base(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

fn is_valid_workflow_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_urls_match_loader_service_layout() {
        let config = LoaderConfig::default();
        assert_eq!(config.upload_url(), "http://localhost:8000/api/upload");
        assert_eq!(
            config.status_url(),
            "http://localhost:8000/api/logicapp-status/dsilaslogicapp"
        );
    }

    #[test]
    fn api_base_is_normalized() {
        assert_eq!(normalize_api_base("api/"), "/api");
        assert_eq!(normalize_api_base("/v2/api"), "/v2/api");
        assert_eq!(normalize_api_base("/"), "");
        assert_eq!(normalize_server_url("https://loader.example.com/"), "https://loader.example.com");
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "server_url = \"https://loader.example.com/\"\nworkflow_name = \"nightly-run\"\nunrelated = 1\n",
        )
        .expect("write config");

        let mut config = LoaderConfig::default();
        config.apply(read_config_file(&path).expect("parsed"));

        assert_eq!(config.server_url, "https://loader.example.com");
        assert_eq!(config.workflow_name, "nightly-run");
        assert_eq!(config.api_base, "/api");
    }

    #[test]
    fn invalid_file_is_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "server_url = [").expect("write config");
        assert!(read_config_file(&path).is_none());
        assert!(read_config_file(&dir.path().join("missing.toml")).is_none());
    }

    #[test]
    fn env_overrides_apply_last() {
        let vars: HashMap<&str, &str> = [
            ("LEAD_LOADER_API_BASE", "loader"),
            ("LEAD_LOADER_WORKFLOW", "bad name/with slash"),
        ]
        .into_iter()
        .collect();

        let mut config = LoaderConfig::default();
        config.apply(env_overrides(|key| vars.get(key).map(|v| v.to_string())));

        assert_eq!(config.api_base, "/loader");
        assert_eq!(config.workflow_name, "dsilaslogicapp");
    }
}
