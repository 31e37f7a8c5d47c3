use eyre::ensure;
use pollinations::config::PollinationsConfig;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub skip_missed_updates: bool,
    /// Seconds
    pub polling_timeout: Option<u32>,
    pub update_limit: Option<u32>,
    pub pollinations: PollinationsConfig,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            skip_missed_updates: false,
            polling_timeout: Some(10),
            update_limit: Some(100),
            pollinations: Default::default(),
        }
    }
}

impl GlobalConfig {
    fn validate(&self) -> eyre::Result<()> {
        if let Some(limit) = self.update_limit {
            ensure!(
                (1..=100).contains(&limit),
                "number of updates to retrieve is strictly 1-100, got {limit}"
            );
        }
        self.pollinations.verify()
    }

    pub fn from_xml(contents: &str) -> eyre::Result<Self> {
        let config = serde_xml_rs::from_str::<Self>(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_xml(contents.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollinations::config::{ImageModel, OutputMode};

    #[test]
    fn load_template_config() {
        let config = GlobalConfig::from_file(
            Path::new(env!("CARGO_MANIFEST_DIR")).join("config.template.xml"),
        )
        .unwrap();
        assert!(!config.skip_missed_updates);
        assert_eq!(config.polling_timeout, Some(10));
        assert_eq!(config.update_limit, Some(100));

        let pollinations = &config.pollinations;
        assert_eq!(pollinations.default_size(), "1024x1024");
        assert_eq!(pollinations.default_model, ImageModel::Flux);
        assert_eq!(pollinations.output, OutputMode::ImageOnly);
        assert!(pollinations.safe);
        assert!(pollinations.translation().is_none());
        assert_eq!(
            pollinations.auto_translate.as_ref().unwrap().service_url,
            "https://libretranslate.com"
        );
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config = GlobalConfig::from_xml(
            "<config>
                <skip_missed_updates>true</skip_missed_updates>
                <pollinations>
                    <default_model>turbo</default_model>
                    <output>detailed</output>
                    <auto_translate><enable>true</enable></auto_translate>
                </pollinations>
            </config>",
        )
        .unwrap();
        assert!(config.skip_missed_updates);
        assert_eq!(config.update_limit, Some(100));
        assert_eq!(config.pollinations.default_model, ImageModel::Turbo);
        assert_eq!(config.pollinations.output, OutputMode::Detailed);
        assert_eq!(config.pollinations.timeout, 30000);
        let translate = config.pollinations.translation().unwrap();
        assert_eq!((translate.source_lang.as_str(), translate.target_lang.as_str()), ("zh", "en"));
    }

    #[test]
    fn update_limit_out_of_range() {
        let err = GlobalConfig::from_xml("<config><update_limit>101</update_limit></config>")
            .unwrap_err();
        assert!(err.to_string().contains("1-100"));
    }
}
