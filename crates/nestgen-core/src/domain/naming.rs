//! Module name value object and the case conversions behind it.
//!
//! A [`ModuleName`] is parsed once from user input. Its kebab, camel and
//! Pascal forms are computed at construction and only ever read afterwards,
//! so paths, class names and generator arguments cannot drift apart.
//!
//! | Input          | kebab          | camel         | Pascal        |
//! |----------------|----------------|---------------|---------------|
//! | `product`      | `product`      | `product`     | `Product`     |
//! | `userProfile`  | `user-profile` | `userProfile` | `UserProfile` |
//! | `order-item`   | `order-item`   | `orderItem`   | `OrderItem`   |
//! | `HTTPClient`   | `http-client`  | `httpClient`  | `HttpClient`  |
//!
//! Every form parses back to the same three forms. Names where that cannot
//! hold are rejected: `a-b` would be Pascal `AB`, which reads as one word.

use std::fmt;

use serde::Serialize;

use crate::domain::error::DomainError;

/// A validated module name together with its derived forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ModuleName {
    raw: String,
    kebab: String,
    camel: String,
    pascal: String,
}

impl ModuleName {
    /// Validate `input` and derive every name form from it.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = input.as_ref().trim();
        validate(raw)?;

        let words = split_words(raw);
        if words.is_empty() {
            return Err(DomainError::EmptyModuleName);
        }

        let kebab = words.join("-");
        let camel = to_camel_case(&words);
        let pascal = to_pascal_case(&words);
        for form in [&camel, &pascal] {
            if split_words(form) != words {
                return Err(DomainError::InvalidModuleName {
                    name: raw.to_string(),
                    reason: format!("the words of '{kebab}' run together in '{form}'"),
                });
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            kebab,
            camel,
            pascal,
        })
    }

    /// The name exactly as the user typed it (trimmed).
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// `user-profile`: directories, file names, routes, generator argument.
    pub fn kebab(&self) -> &str {
        &self.kebab
    }

    /// `userProfile`: local variables and property names.
    pub fn camel(&self) -> &str {
        &self.camel
    }

    /// `UserProfile`: class names.
    pub fn pascal(&self) -> &str {
        &self.pascal
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for ModuleName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn validate(raw: &str) -> Result<(), DomainError> {
    let Some(first) = raw.chars().next() else {
        return Err(DomainError::EmptyModuleName);
    };

    if !first.is_ascii_alphabetic() {
        return Err(DomainError::InvalidModuleName {
            name: raw.to_string(),
            reason: "must start with a letter".into(),
        });
    }

    if let Some(bad) = raw
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' ')))
    {
        return Err(DomainError::InvalidModuleName {
            name: raw.to_string(),
            reason: format!("character '{bad}' is not allowed"),
        });
    }

    Ok(())
}

// ============================================================================
// String Case Conversion Helpers
// ============================================================================

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

fn to_pascal_case(words: &[String]) -> String {
    words.iter().map(|w| capitalize(w)).collect()
}

fn to_camel_case(words: &[String]) -> String {
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Split an identifier into lowercase words.
///
/// Boundaries:
/// 1. `_`, `-` and whitespace always split.
/// 2. lower or digit → upper: `userProfile` → `user` + `profile`,
///    `order2Item` → `order2` + `item`.
/// 3. acronym end, detected as Upper Upper Lower: `HTTPClient` → `http` + `client`.
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(&next) = chars.peek() {
            if (c.is_lowercase() || c.is_ascii_digit()) && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(char::is_lowercase)
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forms(input: &str) -> (String, String, String) {
        let name = ModuleName::parse(input).unwrap();
        (
            name.kebab().to_string(),
            name.camel().to_string(),
            name.pascal().to_string(),
        )
    }

    #[test]
    fn single_lowercase_word() {
        assert_eq!(
            forms("product"),
            ("product".into(), "product".into(), "Product".into())
        );
    }

    #[test]
    fn camel_case_input() {
        assert_eq!(
            forms("userProfile"),
            (
                "user-profile".into(),
                "userProfile".into(),
                "UserProfile".into()
            )
        );
    }

    #[test]
    fn kebab_snake_and_spaced_inputs_agree() {
        let expected = forms("orderItem");
        assert_eq!(forms("order-item"), expected);
        assert_eq!(forms("order_item"), expected);
        assert_eq!(forms("order item"), expected);
        assert_eq!(forms("OrderItem"), expected);
    }

    #[test]
    fn acronym_boundary() {
        assert_eq!(
            forms("HTTPClient"),
            ("http-client".into(), "httpClient".into(), "HttpClient".into())
        );
    }

    #[test]
    fn digits_stay_inside_words() {
        assert_eq!(
            forms("invoice2024"),
            (
                "invoice2024".into(),
                "invoice2024".into(),
                "Invoice2024".into()
            )
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let name = ModuleName::parse("  product  ").unwrap();
        assert_eq!(name.raw(), "product");
        assert_eq!(name.kebab(), "product");
    }

    /// Every name of up to four characters over a representative alphabet.
    fn short_names() -> Vec<String> {
        const ALPHABET: [char; 9] = ['a', 'b', 'A', 'B', '0', '1', ' ', '_', '-'];
        let mut names = vec![String::new()];
        let mut all = Vec::new();
        for _ in 0..4 {
            names = names
                .iter()
                .flat_map(|prefix| {
                    ALPHABET.iter().map(move |c| {
                        let mut name = prefix.clone();
                        name.push(*c);
                        name
                    })
                })
                .collect();
            all.extend(names.iter().cloned());
        }
        all
    }

    #[test]
    fn forms_are_mutually_consistent() {
        let mut accepted = 0;
        for input in short_names()
            .iter()
            .map(String::as_str)
            .chain(["product", "userProfile", "order-item", "HTTPClient", "invoice line"])
        {
            let Ok(name) = ModuleName::parse(input) else {
                continue;
            };
            accepted += 1;
            for form in [name.kebab(), name.camel(), name.pascal()] {
                let again = ModuleName::parse(form)
                    .unwrap_or_else(|e| panic!("{input}: form {form} rejected: {e}"));
                assert_eq!(again.kebab(), name.kebab(), "kebab drift for {input} via {form}");
                assert_eq!(again.camel(), name.camel(), "camel drift for {input} via {form}");
                assert_eq!(again.pascal(), name.pascal(), "pascal drift for {input} via {form}");
            }
        }
        assert!(accepted > 1000, "only {accepted} names accepted");
    }

    #[test]
    fn run_together_words_are_rejected() {
        for bad in ["aB", "a-b", "a b c", "ab-1c", "ab_1"] {
            match ModuleName::parse(bad) {
                Err(DomainError::InvalidModuleName { reason, .. }) => {
                    assert!(reason.contains("run together"), "{bad}: {reason}");
                }
                other => panic!("{bad}: expected rejection, got {other:?}"),
            }
        }
    }

    #[test]
    fn digit_before_capital_splits() {
        assert_eq!(
            forms("order2Item"),
            ("order2-item".into(), "order2Item".into(), "Order2Item".into())
        );
        assert_eq!(forms("order2-item"), forms("order2Item"));
    }

    #[test]
    fn parsing_is_deterministic() {
        assert_eq!(
            ModuleName::parse("userProfile").unwrap(),
            ModuleName::parse("userProfile").unwrap()
        );
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(ModuleName::parse(""), Err(DomainError::EmptyModuleName));
        assert_eq!(ModuleName::parse("   "), Err(DomainError::EmptyModuleName));
    }

    #[test]
    fn leading_digit_is_rejected() {
        assert!(matches!(
            ModuleName::parse("1user"),
            Err(DomainError::InvalidModuleName { .. })
        ));
    }

    #[test]
    fn path_like_names_are_rejected() {
        for bad in ["../user", "user/profile", "user.entity", "user\\x"] {
            assert!(
                matches!(
                    ModuleName::parse(bad),
                    Err(DomainError::InvalidModuleName { .. })
                ),
                "accepted: {bad}"
            );
        }
    }

    #[test]
    fn from_str_matches_parse() {
        let parsed: ModuleName = "userProfile".parse().unwrap();
        assert_eq!(parsed.pascal(), "UserProfile");
    }
}
