use std::fmt;

/// Supported language descriptor
///
/// The set is closed: every `Language` lives in [`Language::all`] and callers
/// hold `&'static` references to those entries.
#[derive(Debug, Eq)]
pub struct Language {
    /// ISO 639-1 code ("en", "zh", "de")
    pub code: &'static str,
    /// English display name
    pub name: &'static str,
    /// Name written in the language itself
    pub native_name: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language {
        code: "en",
        name: "English",
        native_name: "English",
    };

    pub const CHINESE: Language = Language {
        code: "zh",
        name: "Chinese",
        native_name: "中文",
    };

    pub const GERMAN: Language = Language {
        code: "de",
        name: "German",
        native_name: "Deutsch",
    };

    /// Every supported language, in display order
    pub fn all() -> &'static [Language] {
        static ALL: [Language; 3] = [Language::ENGLISH, Language::CHINESE, Language::GERMAN];
        &ALL
    }

    /// Look up a language by code
    pub fn find_by_code(code: &str) -> Option<&'static Language> {
        Self::all().iter().find(|lang| lang.code == code)
    }

    /// Teaching language used when a stored code is not recognised
    pub fn default_teaching() -> &'static Language {
        &Self::all()[1]
    }

    /// Display name for a code, "Unknown" if the code is not in the registry
    pub fn display_name(code: &str) -> &'static str {
        Self::find_by_code(code)
            .map(|lang| lang.name)
            .unwrap_or("Unknown")
    }

    /// Flag emoji for a code
    pub fn flag(code: &str) -> &'static str {
        match code {
            "en" => "🇬🇧",
            "zh" => "🇨🇳",
            "es" => "🇪🇸",
            "fr" => "🇫🇷",
            "de" => "🇩🇪",
            "ja" => "🇯🇵",
            "ko" => "🇰🇷",
            "it" => "🇮🇹",
            "pt" => "🇵🇹",
            "ru" => "🇷🇺",
            "" => "🏳️",
            _ => "🌐",
        }
    }
}

impl PartialEq for Language {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_by_code_returns_chinese() {
        let lang = Language::find_by_code("zh").expect("zh is registered");
        assert_eq!(lang.name, "Chinese");
        assert_eq!(lang.native_name, "中文");
    }

    #[test]
    fn find_by_code_unknown_is_none() {
        assert!(Language::find_by_code("xx").is_none());
        assert!(Language::find_by_code("").is_none());
    }

    #[test]
    fn registry_order_is_stable() {
        let codes: Vec<_> = Language::all().iter().map(|l| l.code).collect();
        assert_eq!(codes, vec!["en", "zh", "de"]);
    }

    #[test]
    fn default_teaching_is_chinese() {
        assert_eq!(Language::default_teaching(), &Language::CHINESE);
    }

    #[test]
    fn display_name_falls_back_to_unknown() {
        assert_eq!(Language::display_name("de"), "German");
        assert_eq!(Language::display_name("xx"), "Unknown");
    }

    #[test]
    fn flag_has_fallback() {
        assert_eq!(Language::flag("de"), "🇩🇪");
        assert_eq!(Language::flag("xx"), "🌐");
    }
}
