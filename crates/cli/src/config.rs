use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use m365sec_graph::{ClientCredentials, GraphClientOptions};

const CONFIG_FILE: &str = "m365sec.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub graph: GraphSettings,
    #[serde(default)]
    pub tenants: Vec<TenantConfig>,
}

/// Overrides for the Graph client. Unset values keep the client defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority_host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantConfig {
    pub name: String,
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl GraphSettings {
    pub fn client_options(&self) -> GraphClientOptions {
        let mut options = GraphClientOptions::default();
        if let Some(ref base_url) = self.base_url {
            options.base_url = base_url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            options.timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = self.max_retries {
            options.max_retries = retries;
        }
        options
    }
}

impl TenantConfig {
    pub fn credentials(&self) -> ClientCredentials {
        ClientCredentials {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            tenant_id: self.tenant_id.clone(),
        }
    }
}

impl AppConfig {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("m365sec")
            .join(CONFIG_FILE)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).with_context(|| {
            format!(
                "config not found at {} (add a tenant with `m365sec tenant add`)",
                path.display()
            )
        })?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Like [`load`](Self::load), but a missing file yields an empty config.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn find_tenant(&self, name: &str) -> Option<&TenantConfig> {
        self.tenants
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// The named tenant, or the only configured one when no name is given.
    pub fn select_tenant(&self, name: Option<&str>) -> Result<&TenantConfig> {
        match name {
            Some(name) => self
                .find_tenant(name)
                .ok_or_else(|| anyhow::anyhow!("tenant '{name}' not found")),
            None => match self.tenants.as_slice() {
                [] => anyhow::bail!("no tenants configured"),
                [only] => Ok(only),
                _ => anyhow::bail!("several tenants configured, pick one with --tenant"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant(name: &str) -> TenantConfig {
        TenantConfig {
            name: name.into(),
            tenant_id: format!("{name}-tid"),
            client_id: "app".into(),
            client_secret: "secret".into(),
        }
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let mut config = AppConfig::default();
        config.graph.max_retries = Some(2);
        config.tenants.push(tenant("contoso"));
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.graph.max_retries, Some(2));
        assert_eq!(loaded.graph.base_url, None);
        assert_eq!(loaded.tenants.len(), 1);
        assert_eq!(loaded.tenants[0].tenant_id, "contoso-tid");
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        assert!(AppConfig::load(&path).is_err());
        assert!(AppConfig::load_or_default(&path).unwrap().tenants.is_empty());
    }

    #[test]
    fn graph_section_is_optional() {
        let config: AppConfig = toml::from_str(
            r#"
            [[tenants]]
            name = "fabrikam"
            tenant_id = "t"
            client_id = "c"
            client_secret = "s"
            "#,
        )
        .unwrap();
        let options = config.graph.client_options();
        assert_eq!(options.base_url, GraphClientOptions::default().base_url);
        assert_eq!(config.tenants[0].name, "fabrikam");
    }

    #[test]
    fn graph_overrides() {
        let config: AppConfig = toml::from_str(
            r#"
            [graph]
            base_url = "https://graph.microsoft.us/v1.0"
            timeout_secs = 30
            "#,
        )
        .unwrap();
        let options = config.graph.client_options();
        assert_eq!(options.base_url, "https://graph.microsoft.us/v1.0");
        assert_eq!(options.timeout, Duration::from_secs(30));
    }

    #[test]
    fn tenant_selection() {
        let mut config = AppConfig::default();
        assert!(config.select_tenant(None).is_err());

        config.tenants.push(tenant("contoso"));
        assert_eq!(config.select_tenant(None).unwrap().name, "contoso");
        assert_eq!(config.select_tenant(Some("CONTOSO")).unwrap().name, "contoso");

        config.tenants.push(tenant("fabrikam"));
        assert!(config.select_tenant(None).is_err());
        assert_eq!(config.select_tenant(Some("fabrikam")).unwrap().name, "fabrikam");
        assert!(config.select_tenant(Some("northwind")).is_err());
    }
}
