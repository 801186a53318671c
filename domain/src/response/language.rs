//! Reply language value object

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Language of a reply (Value Object)
///
/// The answer prompt asks the model to reply in the user's language and
/// tag it with one of these codes. Anything else fails schema validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    Hindi,
    Marathi,
    #[default]
    English,
    Tamil,
}

impl Language {
    /// ISO 639-1 code used on the wire
    pub fn code(&self) -> &'static str {
        match self {
            Language::Hindi => "hi",
            Language::Marathi => "mr",
            Language::English => "en",
            Language::Tamil => "ta",
        }
    }

    pub fn all() -> [Language; 4] {
        [
            Language::Hindi,
            Language::Marathi,
            Language::English,
            Language::Tamil,
        ]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    /// Case-insensitive, whitespace-tolerant code lookup
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hi" => Ok(Language::Hindi),
            "mr" => Ok(Language::Marathi),
            "en" => Ok(Language::English),
            "ta" => Ok(Language::Tamil),
            other => Err(format!(
                "unsupported language '{}', expected one of hi, mr, en, ta",
                other
            )),
        }
    }
}

impl Serialize for Language {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for lang in Language::all() {
            assert_eq!(lang.code().parse::<Language>().unwrap(), lang);
        }
    }

    #[test]
    fn test_parse_tolerates_case_and_whitespace() {
        assert_eq!(" EN ".parse::<Language>().unwrap(), Language::English);
        assert_eq!("Hi".parse::<Language>().unwrap(), Language::Hindi);
    }

    #[test]
    fn test_unknown_code_rejected() {
        let err = "fr".parse::<Language>().unwrap_err();
        assert!(err.contains("fr"));
        assert!(serde_json::from_str::<Language>("\"en-US\"").is_err());
    }
}
