use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

const APP_DIR: &str = "homebook";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub dialogue: DialogueConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CatalogConfig {
    /// JSON array of `{ "name", "keywords" }` objects.
    #[serde(default = "CatalogConfig::default_path")]
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
        }
    }
}

impl CatalogConfig {
    fn default_path() -> PathBuf {
        app_dir().join("services.json")
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "StorageConfig::default_bookings_path")]
    pub bookings_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bookings_path: Self::default_bookings_path(),
        }
    }
}

impl StorageConfig {
    fn default_bookings_path() -> PathBuf {
        app_dir().join("bookings.json")
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DialogueConfig {
    /// Failed service turns before the structured form is offered.
    #[serde(default = "DialogueConfig::default_fallback_threshold")]
    pub fallback_threshold: u32,
    /// Idle seconds after which an unfinished session is dropped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_ttl_secs: Option<u64>,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            fallback_threshold: Self::default_fallback_threshold(),
            session_ttl_secs: None,
        }
    }
}

impl DialogueConfig {
    const fn default_fallback_threshold() -> u32 {
        2
    }
}

/// `~/homebook`, or `./homebook` when no home directory is known.
fn app_dir() -> PathBuf {
    dirs::home_dir().map_or_else(|| PathBuf::from(APP_DIR), |home| home.join(APP_DIR))
}

const CATALOG_TEMPLATE: &str = r#"[
  {
    "name": "AC Servicing",
    "keywords": ["ac servicing", "ac repair", "air conditioner", "aircon", "cooling"]
  },
  {
    "name": "Plumbing",
    "keywords": ["plumbing", "plumber", "leak", "pipe", "tap repair", "drain"]
  },
  {
    "name": "Electrical Repair",
    "keywords": ["electrician", "electrical", "wiring", "switchboard", "power outage"]
  },
  {
    "name": "Deep Cleaning",
    "keywords": ["deep cleaning", "house cleaning", "cleaning", "cleaner", "maid"]
  },
  {
    "name": "Pest Control",
    "keywords": ["pest control", "termite", "cockroach", "fumigation", "bed bugs"]
  },
  {
    "name": "Appliance Repair",
    "keywords": ["appliance repair", "washing machine", "refrigerator", "fridge", "microwave"]
  },
  {
    "name": "Painting",
    "keywords": ["painting", "painter", "wall paint", "repaint"]
  },
  {
    "name": "Carpentry",
    "keywords": ["carpentry", "carpenter", "furniture repair", "door fixing", "cabinet"]
  }
]
"#;

impl Config {
    pub fn config_path() -> PathBuf {
        app_dir().join("config.json")
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'homebook init' to create config.",
                config_path.display()
            );
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_json::from_str(&content)?;
        info!("Loaded config from {}", config_path.display());

        Ok(config)
    }

    /// Loads the config file, falling back to defaults when it is absent.
    pub fn load_or_default() -> anyhow::Result<Self> {
        if Self::config_path().exists() {
            Self::load()
        } else {
            info!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = app_dir();
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config = Self::default();
        std::fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
        println!("✅ Created config file at: {}", config_path.display());

        if config.catalog.path.exists() {
            println!(
                "ℹ️  Keeping existing service catalog at: {}",
                config.catalog.path.display()
            );
        } else {
            std::fs::write(&config.catalog.path, CATALOG_TEMPLATE)?;
            println!(
                "✅ Created service catalog at: {}",
                config.catalog.path.display()
            );
        }

        println!();
        println!("📝 Next steps:");
        println!("   1. Edit services.json to list the services you offer");
        println!("   2. Run 'homebook chat' to talk to the booking assistant");
        println!();
        println!("🔧 Configuration options:");
        println!("   - dialogue.fallback_threshold: failed service turns before the form is shown");
        println!("   - dialogue.session_ttl_secs: drop idle unfinished sessions after N seconds");
        println!("   - storage.bookings_path: where completed bookings are written");
        println!();
        Ok(())
    }

    /// The bundled default service catalog.
    #[must_use]
    pub const fn catalog_template() -> &'static str {
        CATALOG_TEMPLATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config: Config = serde_json::from_str("{}").expect("empty config parses");
        assert_eq!(config.dialogue.fallback_threshold, 2);
        assert!(config.dialogue.session_ttl_secs.is_none());
        assert!(config.catalog.path.ends_with("services.json"));
        assert!(config.storage.bookings_path.ends_with("bookings.json"));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"dialogue": {"session_ttl_secs": 900}}"#).expect("parses");
        assert_eq!(config.dialogue.session_ttl_secs, Some(900));
        assert_eq!(config.dialogue.fallback_threshold, 2);
    }

    #[test]
    fn catalog_template_is_valid_json() {
        let value: serde_json::Value =
            serde_json::from_str(Config::catalog_template()).expect("template parses");
        let services = value.as_array().expect("template is an array");
        assert!(services.iter().any(|s| s["name"] == "AC Servicing"));
    }
}
