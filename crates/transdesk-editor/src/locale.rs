//! Locale codes and the editor's locale set.

use serde::Serialize;

/// Trim and lowercase a locale code.
pub fn normalize_locale(code: &str) -> String {
    code.trim().to_lowercase()
}

/// Display name for the common locales; any other code is echoed back.
pub fn locale_name(code: &str) -> &str {
    match code {
        "en" => "English",
        "es" => "Spanish",
        "fr" => "French",
        "de" => "German",
        "ja" => "Japanese",
        other => other,
    }
}

/// Ordered, duplicate-free locale codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LocaleSet(Vec<String>);

impl LocaleSet {
    /// Build a set from raw codes, normalizing each and dropping blanks and
    /// repeats.
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for code in codes {
            let code = normalize_locale(code.as_ref());
            if !code.is_empty() && !set.contains(&code) {
                set.0.push(code);
            }
        }
        set
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.iter().any(|c| c == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub(crate) fn push(&mut self, code: String) {
        self.0.push(code);
    }

    pub(crate) fn remove(&mut self, code: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|c| c != code);
        self.0.len() != before
    }
}

impl<'a> IntoIterator for &'a LocaleSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
