use compact_str::CompactString;
use derive_more::Display;
use eyre::{bail, ensure};
use serde::Deserialize;
use serde_with::DeserializeFromStr;
use std::{str::FromStr, time::Duration};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollinationsConfig {
    pub default_width: u32,
    pub default_height: u32,
    pub default_model: ImageModel,
    pub enable_enhance: bool,
    /// Ask the service to leave the watermark out
    pub nologo: bool,
    /// Content moderation on the service side
    pub safe: bool,
    pub output: OutputMode,
    pub auto_translate: Option<AutoTranslateConfig>,
    /// Milliseconds
    pub timeout: u64,
    pub base_url: CompactString,
}

impl Default for PollinationsConfig {
    fn default() -> Self {
        Self {
            default_width: 1024,
            default_height: 1024,
            default_model: ImageModel::Flux,
            enable_enhance: false,
            nologo: false,
            safe: true,
            output: OutputMode::ImageOnly,
            auto_translate: None,
            timeout: 30000,
            base_url: "https://image.pollinations.ai".into(),
        }
    }
}

impl PollinationsConfig {
    pub fn verify(&self) -> eyre::Result<()> {
        ensure!(
            self.default_width > 0 && self.default_height > 0,
            "default image size must be positive, got {}",
            self.default_size()
        );
        ensure!(self.timeout > 0, "timeout must be positive");
        ensure!(!self.base_url.is_empty(), "base url cannot be empty");
        if let Some(translate) = self.translation() {
            ensure!(
                !translate.source_lang.is_empty() && !translate.target_lang.is_empty(),
                "translation languages cannot be empty"
            );
            ensure!(
                !translate.service_url.is_empty(),
                "translation service url cannot be empty"
            );
        }
        Ok(())
    }

    pub fn default_size(&self) -> CompactString {
        compact_str::format_compact!("{}x{}", self.default_width, self.default_height)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }

    /// Translation settings, only when translation is switched on
    pub fn translation(&self) -> Option<&AutoTranslateConfig> {
        self.auto_translate.as_ref().filter(|t| t.enable)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AutoTranslateConfig {
    pub enable: bool,
    pub source_lang: CompactString,
    pub target_lang: CompactString,
    pub service_url: CompactString,
}

impl Default for AutoTranslateConfig {
    fn default() -> Self {
        Self {
            enable: false,
            source_lang: "zh".into(),
            target_lang: "en".into(),
            service_url: "https://libretranslate.com".into(),
        }
    }
}

#[derive(Debug, Display, Default, Copy, Clone, PartialEq, Eq, DeserializeFromStr)]
pub enum ImageModel {
    #[default]
    #[display(fmt = "Flux")]
    Flux,
    #[display(fmt = "Turbo")]
    Turbo,
}

impl FromStr for ImageModel {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flux" => Ok(ImageModel::Flux),
            "turbo" => Ok(ImageModel::Turbo),
            _ => bail!("unknown image model '{s}'"),
        }
    }
}

#[derive(Debug, Display, Default, Copy, Clone, PartialEq, Eq, DeserializeFromStr)]
pub enum OutputMode {
    #[default]
    #[display(fmt = "image_only")]
    ImageOnly,
    #[display(fmt = "detailed")]
    Detailed,
}

impl FromStr for OutputMode {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "image_only" => Ok(OutputMode::ImageOnly),
            "imageonly" => Ok(OutputMode::ImageOnly),
            "仅图片" => Ok(OutputMode::ImageOnly),
            "detailed" => Ok(OutputMode::Detailed),
            "详细信息" => Ok(OutputMode::Detailed),
            _ => bail!("unknown output mode '{s}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_mode_from_str() {
        assert_eq!(OutputMode::from_str("仅图片").unwrap(), OutputMode::ImageOnly);
        assert_eq!(OutputMode::from_str("Image_Only").unwrap(), OutputMode::ImageOnly);
        assert_eq!(OutputMode::from_str("详细信息").unwrap(), OutputMode::Detailed);
        assert_eq!(OutputMode::from_str("detailed").unwrap(), OutputMode::Detailed);
        assert!(OutputMode::from_str("verbose").is_err());
    }

    #[test]
    fn image_model_round_trips_through_display() {
        assert_eq!(ImageModel::from_str("Flux").unwrap(), ImageModel::Flux);
        assert_eq!(ImageModel::from_str("TURBO").unwrap(), ImageModel::Turbo);
        assert_eq!(ImageModel::Turbo.to_string(), "Turbo");
        assert_eq!(
            ImageModel::from_str(&ImageModel::Flux.to_string()).unwrap(),
            ImageModel::Flux
        );
        assert!(ImageModel::from_str("sdxl").is_err());
    }

    #[test]
    fn defaults_from_empty_document() {
        let config = serde_json::from_str::<PollinationsConfig>("{}").unwrap();
        assert_eq!(config.default_size(), "1024x1024");
        assert_eq!(config.default_model, ImageModel::Flux);
        assert_eq!(config.output, OutputMode::ImageOnly);
        assert!(config.safe);
        assert!(!config.nologo);
        assert!(!config.enable_enhance);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.translation().is_none());
        config.verify().unwrap();
    }

    #[test]
    fn translation_needs_to_be_enabled() {
        let config = serde_json::from_value::<PollinationsConfig>(serde_json::json!({
            "output": "详细信息",
            "auto_translate": {"enable": false}
        }))
        .unwrap();
        assert_eq!(config.output, OutputMode::Detailed);
        assert!(config.translation().is_none());

        let config = serde_json::from_value::<PollinationsConfig>(serde_json::json!({
            "auto_translate": {"enable": true, "target_lang": "de"}
        }))
        .unwrap();
        let translate = config.translation().unwrap();
        assert_eq!(translate.source_lang, "zh");
        assert_eq!(translate.target_lang, "de");
    }

    #[test]
    fn verify_rejects_bad_values() {
        let config = PollinationsConfig {
            default_width: 0,
            ..Default::default()
        };
        assert!(config.verify().is_err());
        let config = PollinationsConfig {
            timeout: 0,
            ..Default::default()
        };
        assert!(config.verify().is_err());
        let config = PollinationsConfig {
            auto_translate: Some(AutoTranslateConfig {
                enable: true,
                source_lang: "".into(),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(config.verify().is_err());
    }
}
