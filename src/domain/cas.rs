use crate::utils::error::{Result, SynthesisError};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static CAS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2,7}-\d{2}-\d$").expect("CAS pattern is a valid regex"));

/// A syntactically valid CAS registry number. The check digit is not verified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CasNumber(String);

impl CasNumber {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if CAS_PATTERN.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(SynthesisError::ValidationError {
                input: raw.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CasNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_numbers() {
        for raw in ["64-17-5", "50-00-0", "7732-18-5", "1234567-89-0", "58-08-2"] {
            let cas = CasNumber::parse(raw).unwrap();
            assert_eq!(cas.as_str(), raw);
        }
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let cas = CasNumber::parse("  64-17-5\n").unwrap();
        assert_eq!(cas.as_str(), "64-17-5");
    }

    #[test]
    fn rejects_malformed_numbers() {
        for raw in [
            "abc",
            "64-17",
            "64175",
            "not-a-cas",
            "",
            "6-17-5",
            "12345678-12-3",
            "64-1-5",
            "64-17-55",
            "64 17 5",
            "64-17-5x",
        ] {
            match CasNumber::parse(raw) {
                Err(SynthesisError::ValidationError { input }) => assert_eq!(input, raw),
                other => panic!("expected validation error for {:?}, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn does_not_verify_check_digit() {
        // 64-17-5 is ethanol; a wrong check digit is still syntactically fine
        assert!(CasNumber::parse("64-17-9").is_ok());
    }
}
