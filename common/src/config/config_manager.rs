use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads a config once, validates it, and caches it; a missing source
/// yields `TConfig::default()` without caching so a later write is picked up.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(FileContentConfigProvider::new(file_path), YamlConfigSerializer)
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config: Arc::new(Mutex::new(None)),
            config_content_provider,
            config_serializer,
        }
    }

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(config_data) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&config_data)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider
            .set_config_content(&serialized_config)?;

        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;
        *current = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    struct TestConfig {
        tick_interval_ms: u64,
    }

    impl Validate for TestConfig {
        fn validate(&self) -> Result<(), String> {
            crate::config::validate_tick_interval_ms(self.tick_interval_ms)
        }
    }

    struct MemoryProvider {
        content: RefCell<Option<String>>,
    }

    impl ConfigContentProvider for MemoryProvider {
        fn get_config_content(&self) -> Result<Option<String>, String> {
            Ok(self.content.borrow().clone())
        }

        fn set_config_content(&self, content: &str) -> Result<(), String> {
            *self.content.borrow_mut() = Some(content.to_string());
            Ok(())
        }
    }

    fn manager(content: Option<&str>) -> ConfigManager<MemoryProvider, TestConfig> {
        ConfigManager::new(
            MemoryProvider { content: RefCell::new(content.map(str::to_string)) },
            YamlConfigSerializer,
        )
    }

    #[test]
    fn test_missing_content_returns_default() {
        let config = manager(None).get_config().unwrap();
        assert_eq!(config, TestConfig::default());
    }

    #[test]
    fn test_loads_yaml() {
        let config = manager(Some("tick_interval_ms: 200\n")).get_config().unwrap();
        assert_eq!(config.tick_interval_ms, 200);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let err = manager(Some("tick_interval_ms: 10\n")).get_config().unwrap_err();
        assert!(err.starts_with("Config validation error"));
    }

    #[test]
    fn test_set_config_round_trips_through_provider() {
        let manager = manager(None);
        manager.set_config(&TestConfig { tick_interval_ms: 300 }).unwrap();
        let stored = manager.config_content_provider.content.borrow().clone().unwrap();
        assert!(stored.contains("tick_interval_ms: 300"));
        assert_eq!(manager.get_config().unwrap().tick_interval_ms, 300);
    }

    #[test]
    fn test_set_config_refuses_invalid() {
        let manager = manager(None);
        assert!(manager.set_config(&TestConfig { tick_interval_ms: 0 }).is_err());
        assert!(manager.config_content_provider.content.borrow().is_none());
    }
}
