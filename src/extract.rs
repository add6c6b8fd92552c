//! Field extraction from profile page markup.
//!
//! Extraction is driven by data, not code: a [`RuleSet`] names a CSS
//! selector (and optionally an attribute) for each of the two required
//! fields, so pointing the pipeline at a differently shaped profile page is
//! a YAML file away. The built-in [`RuleSet::default`] targets the Rutube
//! channel banner this tool was first written for.
//!
//! A page either yields both fields or none. The extractor trims the display
//! name, reduces the follower text to its decimal digits (dropping locale
//! suffixes like "подписчиков"), and fails the whole item if either field
//! comes out empty.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field label used in error messages and logs.
const FIELD_NAME: &str = "name";
/// Field label used in error messages and logs.
const FIELD_FOLLOWERS: &str = "followers";

static NON_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]+").unwrap());

/// Errors produced while building an extractor or applying it to a page.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A configured selector is not valid CSS. Raised at extractor
    /// construction, before any page is fetched.
    #[error("invalid selector `{selector}` for {field}: {message}")]
    InvalidSelector {
        field: &'static str,
        selector: String,
        message: String,
    },
    /// The selector matched nothing in the document.
    #[error("no element matched `{selector}` for {field}")]
    NoMatch {
        field: &'static str,
        selector: String,
    },
    /// The selector matched, but the value normalized down to nothing.
    #[error("{field} empty after normalization")]
    EmptyField { field: &'static str },
}

/// Where one field's value comes from: a CSS selector plus the choice of
/// reading an attribute or the element's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    /// CSS selector; the first matching element wins.
    pub selector: String,
    /// Attribute to read from the matched element. `None` reads the
    /// element's text content instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr: Option<String>,
}

/// The complete extraction policy: one rule per required field.
///
/// Loadable from YAML:
///
/// ```yaml
/// name:
///   selector: "h1.profile-banner__title"
///   attr: title
/// followers:
///   selector: ".profile-banner__stats p"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Rule for the display name field.
    pub name: FieldRule,
    /// Rule for the follower count field.
    pub followers: FieldRule,
}

impl Default for RuleSet {
    /// The Rutube channel banner markup: the display name sits in the
    /// `title` attribute of the banner heading, the follower line in the
    /// paragraph next to it.
    fn default() -> Self {
        Self {
            name: FieldRule {
                selector: "h1.wdp-feed-banner-module__wdp-feed-banner__title-text".to_string(),
                attr: Some("title".to_string()),
            },
            followers: FieldRule {
                selector: ".wdp-feed-banner-module__wdp-feed-banner__title p".to_string(),
                attr: None,
            },
        }
    }
}

/// One compiled rule: the parsed selector plus the attribute choice.
#[derive(Debug, Clone)]
struct CompiledRule {
    field: &'static str,
    selector: Selector,
    selector_text: String,
    attr: Option<String>,
}

impl CompiledRule {
    fn compile(field: &'static str, rule: &FieldRule) -> Result<Self, ExtractError> {
        let selector =
            Selector::parse(&rule.selector).map_err(|e| ExtractError::InvalidSelector {
                field,
                selector: rule.selector.clone(),
                message: e.to_string(),
            })?;
        Ok(Self {
            field,
            selector,
            selector_text: rule.selector.clone(),
            attr: rule.attr.clone(),
        })
    }

    /// Raw value of this rule against `document`: the first matching
    /// element's attribute or text. A matched element with the attribute
    /// missing yields an empty string, which the caller rejects after
    /// normalization.
    fn lookup(&self, document: &Html) -> Result<String, ExtractError> {
        let element = document
            .select(&self.selector)
            .next()
            .ok_or_else(|| ExtractError::NoMatch {
                field: self.field,
                selector: self.selector_text.clone(),
            })?;
        let raw = match &self.attr {
            Some(attr) => element.value().attr(attr).unwrap_or_default().to_string(),
            None => element.text().collect::<String>(),
        };
        Ok(raw)
    }
}

/// Applies a compiled [`RuleSet`] to raw page bodies.
#[derive(Debug, Clone)]
pub struct ProfileExtractor {
    name: CompiledRule,
    followers: CompiledRule,
}

/// Both extracted fields, normalized and non-empty, before the roster index
/// is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFields {
    pub name: String,
    pub followers: String,
}

impl ProfileExtractor {
    /// Compile `rules` into an extractor, validating both selectors up
    /// front so a bad rule file fails the run before any fetch happens.
    pub fn new(rules: &RuleSet) -> Result<Self, ExtractError> {
        Ok(Self {
            name: CompiledRule::compile(FIELD_NAME, &rules.name)?,
            followers: CompiledRule::compile(FIELD_FOLLOWERS, &rules.followers)?,
        })
    }

    /// Parse `body` and pull out both fields.
    ///
    /// Rules apply in a fixed order, name first, and the first failure
    /// aborts the item: there is no such thing as a half-extracted profile.
    pub fn extract(&self, body: &str) -> Result<ProfileFields, ExtractError> {
        let document = Html::parse_document(body);

        let name = normalize_name(&self.name.lookup(&document)?);
        if name.is_empty() {
            return Err(ExtractError::EmptyField { field: FIELD_NAME });
        }

        let followers = normalize_followers(&self.followers.lookup(&document)?);
        if followers.is_empty() {
            return Err(ExtractError::EmptyField {
                field: FIELD_FOLLOWERS,
            });
        }

        Ok(ProfileFields { name, followers })
    }
}

/// Display-name normalization: surrounding whitespace goes, inner spacing
/// stays as scraped.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_string()
}

/// Follower-count normalization: trim, then drop every character that is
/// not a decimal digit. Digit order is preserved, so `"12 345 подписчиков"`
/// becomes `"12345"`.
pub fn normalize_followers(raw: &str) -> String {
    NON_DIGITS.replace_all(raw.trim(), "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banner_page(name_title: &str, followers_text: &str) -> String {
        format!(
            r#"<html><body>
            <div class="wdp-feed-banner-module__wdp-feed-banner__title">
                <h1 class="wdp-feed-banner-module__wdp-feed-banner__title-text" title="{name_title}">{name_title}</h1>
                <p>{followers_text}</p>
            </div>
            </body></html>"#
        )
    }

    #[test]
    fn test_default_rules_compile() {
        assert!(ProfileExtractor::new(&RuleSet::default()).is_ok());
    }

    #[test]
    fn test_invalid_selector_rejected_at_construction() {
        let mut rules = RuleSet::default();
        rules.followers.selector = ":::not-css".to_string();
        let err = ProfileExtractor::new(&rules).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::InvalidSelector {
                field: "followers",
                ..
            }
        ));
    }

    #[test]
    fn test_rules_load_from_yaml() {
        let yaml = r#"
name:
  selector: "h1.profile-title"
  attr: title
followers:
  selector: ".profile-stats p"
"#;
        let rules: RuleSet = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rules.name.selector, "h1.profile-title");
        assert_eq!(rules.name.attr.as_deref(), Some("title"));
        assert_eq!(rules.followers.selector, ".profile-stats p");
        assert_eq!(rules.followers.attr, None);
    }

    #[test]
    fn test_extracts_both_fields_from_banner() {
        let extractor = ProfileExtractor::new(&RuleSet::default()).unwrap();
        let fields = extractor
            .extract(&banner_page("Alice", "1000 подписчиков"))
            .unwrap();
        assert_eq!(fields.name, "Alice");
        assert_eq!(fields.followers, "1000");
    }

    #[test]
    fn test_attribute_rule_reads_attribute_not_text() {
        let extractor = ProfileExtractor::new(&RuleSet::default()).unwrap();
        let html = r#"<html><body>
            <div class="wdp-feed-banner-module__wdp-feed-banner__title">
                <h1 class="wdp-feed-banner-module__wdp-feed-banner__title-text" title="Full Display Name">shortened…</h1>
                <p>42 подписчика</p>
            </div>
            </body></html>"#;
        let fields = extractor.extract(html).unwrap();
        assert_eq!(fields.name, "Full Display Name");
        assert_eq!(fields.followers, "42");
    }

    #[test]
    fn test_text_rule_concatenates_nested_text_nodes() {
        let rules = RuleSet {
            name: FieldRule {
                selector: "h1".to_string(),
                attr: None,
            },
            followers: FieldRule {
                selector: "p".to_string(),
                attr: None,
            },
        };
        let extractor = ProfileExtractor::new(&rules).unwrap();
        let html = "<html><body><h1> Carol <span>the Second</span></h1><p>12 <b>345</b> followers</p></body></html>";
        let fields = extractor.extract(html).unwrap();
        assert_eq!(fields.name, "Carol the Second");
        assert_eq!(fields.followers, "12345");
    }

    #[test]
    fn test_no_match_when_selectors_miss() {
        let extractor = ProfileExtractor::new(&RuleSet::default()).unwrap();
        let err = extractor
            .extract("<html><body><h1>plain page</h1></body></html>")
            .unwrap_err();
        assert!(matches!(err, ExtractError::NoMatch { field: "name", .. }));
    }

    #[test]
    fn test_missing_attribute_is_empty_field() {
        let extractor = ProfileExtractor::new(&RuleSet::default()).unwrap();
        let html = r#"<html><body>
            <div class="wdp-feed-banner-module__wdp-feed-banner__title">
                <h1 class="wdp-feed-banner-module__wdp-feed-banner__title-text">Alice</h1>
                <p>1000 подписчиков</p>
            </div>
            </body></html>"#;
        let err = extractor.extract(html).unwrap_err();
        assert!(matches!(err, ExtractError::EmptyField { field: "name" }));
    }

    #[test]
    fn test_followers_without_digits_is_empty_field() {
        let extractor = ProfileExtractor::new(&RuleSet::default()).unwrap();
        let err = extractor
            .extract(&banner_page("Alice", "скрыто"))
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractError::EmptyField { field: "followers" }
        ));
    }

    #[test]
    fn test_normalize_name_trims_surrounding_whitespace() {
        assert_eq!(normalize_name("  Alice  "), "Alice");
        assert_eq!(normalize_name("\n\tBob Dvorak \t"), "Bob Dvorak");
        assert_eq!(normalize_name("   "), "");
    }

    #[test]
    fn test_normalize_followers_strips_everything_but_digits() {
        assert_eq!(normalize_followers("12 345 followers"), "12345");
        assert_eq!(normalize_followers(" 12 345 подписчиков "), "12345");
        assert_eq!(normalize_followers("1,234,567"), "1234567");
        assert_eq!(normalize_followers("9"), "9");
        assert_eq!(normalize_followers("скрыто"), "");
    }
}
