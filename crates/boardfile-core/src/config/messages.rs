//! User-facing strings per locale.

use serde::{Deserialize, Serialize};

/// Language for labels and alerts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ko,
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ko" => Ok(Self::Ko),
            other => Err(format!("unsupported locale '{other}' (expected en or ko)")),
        }
    }
}

/// Strings shown in the selection list, picker label and alerts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub new_suffix: &'static str,
    pub removed_suffix: &'static str,
    pub generic_failure: &'static str,
    pub picker_placeholder: &'static str,
    locale: Locale,
}

impl Messages {
    pub const fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self {
                new_suffix: " (new)",
                removed_suffix: " (removed)",
                generic_failure: "An error occurred while processing the request.",
                picker_placeholder: "Choose a file",
                locale,
            },
            Locale::Ko => Self {
                new_suffix: " (새파일)",
                removed_suffix: " (삭제)",
                generic_failure: "요청 처리 중 오류가 발생했습니다.",
                picker_placeholder: "파일을 선택하세요",
                locale,
            },
        }
    }

    /// Picker label after `count` files were chosen.
    pub fn picker_count(&self, count: usize) -> String {
        match self.locale {
            Locale::En if count == 1 => "1 file selected".to_string(),
            Locale::En => format!("{count} files selected"),
            Locale::Ko => format!("{count}개의 파일이 선택되었습니다"),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_parses_case_insensitively() {
        assert_eq!(" KO ".parse::<Locale>().unwrap(), Locale::Ko);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn picker_count_pluralizes_english() {
        let messages = Messages::for_locale(Locale::En);
        assert_eq!(messages.picker_count(1), "1 file selected");
        assert_eq!(messages.picker_count(3), "3 files selected");
    }

    #[test]
    fn korean_strings_are_available() {
        let messages = Messages::for_locale(Locale::Ko);
        assert_eq!(messages.new_suffix, " (새파일)");
        assert_eq!(messages.picker_count(2), "2개의 파일이 선택되었습니다");
    }
}
