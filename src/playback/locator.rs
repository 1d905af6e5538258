//! Audio locators
//!
//! Maps a (syllable, tone) pair to the path or URL of its recording. Clip
//! banks name files `<syllable><tone>.<ext>` with `ü` spelled `v`, under a
//! bank-specific base and optional prefix:
//!
//! ```text
//! https://cdn.yoyochinese.com/audio/pychart/lv3.mp3
//! audio/lv3.mp3
//! audio/py-lv3.mp3
//! ```

use serde::{Deserialize, Serialize};

use crate::tones::Tone;

/// Resolves a clip locator. Implemented by [`LocatorTemplate`] and by any
/// `Fn(&str, Tone) -> String` closure.
pub trait Locate {
    fn locate(&self, syllable: &str, tone: Tone) -> String;
}

impl<F> Locate for F
where
    F: Fn(&str, Tone) -> String,
{
    fn locate(&self, syllable: &str, tone: Tone) -> String {
        self(syllable, tone)
    }
}

/// Spelling used in clip file names: `ü` becomes `v`.
pub fn ascii_alias(syllable: &str) -> String {
    syllable.replace('ü', "v")
}

/// `base + prefix + syllable + tone + extension`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LocatorTemplate {
    pub base: String,
    pub prefix: String,
    pub extension: String,
}

impl LocatorTemplate {
    pub const CDN_BASE: &'static str = "https://cdn.yoyochinese.com/audio/pychart/";

    /// The remote clip bank.
    pub fn cdn() -> Self {
        Self {
            base: Self::CDN_BASE.to_string(),
            prefix: String::new(),
            extension: ".mp3".to_string(),
        }
    }

    /// A local directory of `<syllable><tone>.mp3` files.
    pub fn local_bank(dir: &str) -> Self {
        Self {
            base: with_trailing_slash(dir),
            prefix: String::new(),
            extension: ".mp3".to_string(),
        }
    }

    /// A local directory whose files carry a common name prefix.
    pub fn prefixed_bank(dir: &str, prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            ..Self::local_bank(dir)
        }
    }
}

impl Default for LocatorTemplate {
    fn default() -> Self {
        Self::cdn()
    }
}

impl Locate for LocatorTemplate {
    fn locate(&self, syllable: &str, tone: Tone) -> String {
        format!(
            "{}{}{}{}{}",
            self.base,
            self.prefix,
            ascii_alias(syllable),
            tone.number(),
            self.extension
        )
    }
}

fn with_trailing_slash(dir: &str) -> String {
    if dir.is_empty() || dir.ends_with('/') {
        dir.to_string()
    } else {
        format!("{}/", dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdn_locator() {
        assert_eq!(
            LocatorTemplate::cdn().locate("ma", Tone::Third),
            "https://cdn.yoyochinese.com/audio/pychart/ma3.mp3"
        );
    }

    #[test]
    fn test_umlaut_spelled_v() {
        assert_eq!(LocatorTemplate::local_bank("audio").locate("lüe", Tone::Fourth), "audio/lve4.mp3");
        assert_eq!(LocatorTemplate::local_bank("audio/").locate("nü", Tone::First), "audio/nv1.mp3");
    }

    #[test]
    fn test_prefixed_bank() {
        assert_eq!(
            LocatorTemplate::prefixed_bank("clips", "py-").locate("zhuang", Tone::Second),
            "clips/py-zhuang2.mp3"
        );
    }

    #[test]
    fn test_closure_locator() {
        let memory = |s: &str, t: Tone| format!("mem://{}/{}", s, t);
        assert_eq!(memory.locate("ba", Tone::First), "mem://ba/1");
    }

    #[test]
    fn test_template_from_yaml() {
        let t: LocatorTemplate = serde_yaml::from_str("base: /srv/audio/\nextension: .ogg").unwrap();
        assert_eq!(t.prefix, "");
        assert_eq!(t.locate("er", Tone::Second), "/srv/audio/er2.ogg");
    }
}
