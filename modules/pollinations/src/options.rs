use crate::config::PollinationsConfig;
use compact_str::{CompactString, ToCompactString};
use eyre::bail;
use rand::Rng;

pub const SIZE_DELIMITERS: [char; 6] = ['x', 'X', '×', ',', '，', '*'];
pub const MAX_SEED: u32 = 999_999_999;

/// Per invocation settings, configuration defaults overridden by the leading flags of the query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOptions {
    pub size: CompactString,
    pub seed: Option<CompactString>,
    pub model: CompactString,
    pub enhance: bool,
    pub nologo: bool,
    pub prompt: CompactString,
}

impl DrawOptions {
    pub fn defaults(config: &PollinationsConfig) -> Self {
        Self {
            size: config.default_size(),
            seed: None,
            model: config.default_model.to_compact_string(),
            enhance: config.enable_enhance,
            nologo: config.nologo,
            prompt: Default::default(),
        }
    }

    /// Flags come first, everything after the first non-flag word is the prompt, verbatim
    pub fn parse(query: &str, config: &PollinationsConfig) -> eyre::Result<Self> {
        let mut options = Self::defaults(config);
        let mut rest = query.trim_start();
        loop {
            let (flag, tail) = next_word(rest);
            match flag {
                "-z" | "--size" => {
                    let (value, tail) = flag_value(flag, tail)?;
                    options.size = value.into();
                    rest = tail;
                }
                "-s" | "--seed" => {
                    let (value, tail) = flag_value(flag, tail)?;
                    options.seed = Some(value.into());
                    rest = tail;
                }
                "-m" | "--model" => {
                    let (value, tail) = flag_value(flag, tail)?;
                    options.model = value.into();
                    rest = tail;
                }
                "-e" | "--enhance" => {
                    options.enhance = true;
                    rest = tail;
                }
                "-n" | "--nologo" => {
                    options.nologo = true;
                    rest = tail;
                }
                _ => break,
            }
        }
        options.prompt = rest.trim().into();
        Ok(options)
    }
}

fn next_word(s: &str) -> (&str, &str) {
    let (word, tail) = s.split_once(char::is_whitespace).unwrap_or((s, ""));
    (word, tail.trim_start())
}

fn flag_value<'a>(flag: &str, tail: &'a str) -> eyre::Result<(&'a str, &'a str)> {
    if tail.is_empty() {
        bail!("option {flag} requires a value");
    }
    Ok(next_word(tail))
}

/// Width and height as written, split on the first two pieces around any size delimiter.
/// No numeric check, the service answers malformed sizes with its own error.
pub fn split_size(size: &str) -> (CompactString, CompactString) {
    let mut parts = size.split(&SIZE_DELIMITERS[..]).map(str::trim);
    let width = parts.next().unwrap_or_default();
    let height = parts.next().unwrap_or_default();
    (width.into(), height.into())
}

/// A non-empty seed is used verbatim, otherwise a random one from `0..=MAX_SEED`
pub fn resolve_seed(seed: Option<&str>) -> CompactString {
    match seed {
        Some(seed) if !seed.is_empty() => seed.into(),
        _ => rand::thread_rng()
            .gen_range(0..=MAX_SEED)
            .to_compact_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImageModel;

    #[test]
    fn split_size_on_every_delimiter() {
        for size in ["512x768", "512X768", "512×768", "512,768", "512，768", "512*768"] {
            assert_eq!(split_size(size), ("512".into(), "768".into()), "{size}");
        }
        assert_eq!(split_size(" 512 x 768 "), ("512".into(), "768".into()));
    }

    #[test]
    fn split_size_passes_junk_through() {
        assert_eq!(split_size("axb"), ("a".into(), "b".into()));
        assert_eq!(split_size("512x768x2"), ("512".into(), "768".into()));
        assert_eq!(split_size("512"), ("512".into(), "".into()));
    }

    #[test]
    fn random_seed_in_range() {
        let seeds = (0..64)
            .map(|_| resolve_seed(None))
            .collect::<Vec<_>>();
        for seed in &seeds {
            let value = seed.parse::<u32>().unwrap();
            assert!(value <= MAX_SEED);
            assert_eq!(seed.as_str(), value.to_string());
        }
        assert!(seeds.iter().any(|seed| *seed != seeds[0]));
        assert_ne!(resolve_seed(Some("")), "");
        assert_eq!(resolve_seed(Some("42")), "42");
    }

    #[test]
    fn parse_uses_config_defaults() {
        let config = PollinationsConfig {
            default_width: 768,
            default_height: 512,
            default_model: ImageModel::Turbo,
            enable_enhance: true,
            ..Default::default()
        };
        let options = DrawOptions::parse("a lighthouse at dusk", &config).unwrap();
        assert_eq!(
            options,
            DrawOptions {
                size: "768x512".into(),
                seed: None,
                model: "Turbo".into(),
                enhance: true,
                nologo: false,
                prompt: "a lighthouse at dusk".into(),
            }
        );
    }

    #[test]
    fn parse_flags_before_prompt() {
        let config = PollinationsConfig::default();
        let options = DrawOptions::parse(
            "-z 512，768 --seed 42 -m my-model -e -n  一只 -n 猫 ",
            &config,
        )
        .unwrap();
        assert_eq!(options.size, "512，768");
        assert_eq!(options.seed.as_deref(), Some("42"));
        assert_eq!(options.model, "my-model");
        assert!(options.enhance);
        assert!(options.nologo);
        assert_eq!(options.prompt, "一只 -n 猫");
    }

    #[test]
    fn parse_blank_and_flag_only_queries() {
        let config = PollinationsConfig::default();
        assert_eq!(DrawOptions::parse("   ", &config).unwrap().prompt, "");
        assert_eq!(DrawOptions::parse("-e -n", &config).unwrap().prompt, "");
    }

    #[test]
    fn parse_missing_value() {
        let config = PollinationsConfig::default();
        let err = DrawOptions::parse("-s", &config).unwrap_err();
        assert_eq!(err.to_string(), "option -s requires a value");
        assert!(DrawOptions::parse("-e -z   ", &config).is_err());
    }
}
