use advancely_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Email domain a company accepts for new users, for example `example.com`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailDomain(String);

impl EmailDomain {
    /// Creates a validated, lowercased email domain.
    ///
    /// Accepts one or more labels of ASCII letters, digits and hyphens
    /// followed by an alphabetic top-level label of at least two characters.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value: String = value.into();
        let value = value.trim().to_ascii_lowercase();
        let labels: Vec<&str> = value.split('.').collect();

        let Some((top_level, rest)) = labels.split_last() else {
            return Err(invalid_domain(&value));
        };

        if rest.is_empty() {
            return Err(invalid_domain(&value));
        }

        let labels_are_valid = rest.iter().all(|label| {
            !label.is_empty()
                && label
                    .chars()
                    .all(|character| character.is_ascii_alphanumeric() || character == '-')
        });
        let top_level_is_valid = top_level.len() >= 2
            && top_level
                .chars()
                .all(|character| character.is_ascii_alphabetic());

        if !labels_are_valid || !top_level_is_valid {
            return Err(invalid_domain(&value));
        }

        Ok(Self(value))
    }

    /// Returns the domain string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

fn invalid_domain(value: &str) -> AppError {
    AppError::Validation(format!("invalid domain '{value}'"))
}

#[cfg(test)]
mod tests {
    use super::EmailDomain;

    #[test]
    fn accepts_subdomains_and_normalises_case() {
        let domain = EmailDomain::new("Mail.Example.COM");
        assert_eq!(
            domain.map(|value| value.as_str().to_owned()).unwrap_or_default(),
            "mail.example.com"
        );
    }

    #[test]
    fn rejects_malformed_domains() {
        for value in [
            "",
            "example",
            "example.c",
            "exa mple.com",
            ".com",
            "user@example.com",
            "example.c0m",
        ] {
            assert!(EmailDomain::new(value).is_err(), "{value} should be rejected");
        }
    }
}
