//! ModuleConfig - module 設定レコードと、review routine が必要とするパラメータ
//!
//! レコードは外部ストアの持ち物。ここでは読んで `params` を decode し、
//! review 用のフィールドが使えるかを確かめるだけ。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ModuleId;

/// A stored module configuration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub id: ModuleId,

    /// Feature tag of the record (CMS column `module`).
    #[serde(alias = "module")]
    pub kind: String,

    /// Serialized JSON object, as the store keeps it.
    #[serde(default)]
    pub params: String,
}

impl ModuleConfig {
    pub fn new(id: impl Into<ModuleId>, kind: impl Into<String>, params: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            params: params.into(),
        }
    }

    /// Decode `params` into a flat string map.
    ///
    /// Strings are kept verbatim and numbers are rendered as text. Any other
    /// JSON value (null, bool, array, object) is dropped, so it reads as absent.
    pub fn decode_params(&self) -> Result<BTreeMap<String, String>, serde_json::Error> {
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(&self.params)?;
        Ok(raw
            .into_iter()
            .filter_map(|(k, v)| match v {
                serde_json::Value::String(s) => Some((k, s)),
                serde_json::Value::Number(n) => Some((k, n.to_string())),
                _ => None,
            })
            .collect())
    }
}

/// The four fields the remote review endpoint requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewParams {
    pub cid: String,
    pub api_key: String,
    pub review_sort: String,
    pub secret: String,
}

/// Stored key for each required field, with accepted aliases.
const CID_KEYS: &[&str] = &["cid"];
const API_KEY_KEYS: &[&str] = &["apikey", "apiKey"];
const REVIEW_SORT_KEYS: &[&str] = &["reviewsort", "reviewSort"];
const SECRET_KEYS: &[&str] = &["secret"];

impl ReviewParams {
    /// Pick the required fields out of decoded params.
    ///
    /// Returns the canonical names of every field that is missing or empty.
    pub fn from_map(params: &BTreeMap<String, String>) -> Result<Self, Vec<&'static str>> {
        let mut missing = Vec::new();
        let mut take = |keys: &[&'static str]| -> String {
            let found = keys
                .iter()
                .filter_map(|k| params.get(*k))
                .find(|v| !v.is_empty())
                .cloned();
            match found {
                Some(v) => v,
                None => {
                    missing.push(keys[0]);
                    String::new()
                }
            }
        };

        let cid = take(CID_KEYS);
        let api_key = take(API_KEY_KEYS);
        let review_sort = take(REVIEW_SORT_KEYS);
        let secret = take(SECRET_KEYS);

        if missing.is_empty() {
            Ok(Self {
                cid,
                api_key,
                review_sort,
                secret,
            })
        } else {
            Err(missing)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn params_json() -> &'static str {
        r#"{"cid":"12345","apikey":"AIza-test","reviewsort":"newest","secret":"s3cr3t","layout":"_:grid"}"#
    }

    #[test]
    fn decode_keeps_strings_and_numbers() {
        let cfg = ModuleConfig::new(
            "1",
            "mod_prettyreviews",
            r#"{"cid": 42, "secret": "x", "show": true, "list": [1]}"#,
        );
        let map = cfg.decode_params().unwrap();
        assert_eq!(map.get("cid").map(String::as_str), Some("42"));
        assert_eq!(map.get("secret").map(String::as_str), Some("x"));
        assert!(!map.contains_key("show"));
        assert!(!map.contains_key("list"));
    }

    #[test]
    fn decode_rejects_non_object() {
        let cfg = ModuleConfig::new("1", "mod_prettyreviews", "not json");
        assert!(cfg.decode_params().is_err());

        let cfg = ModuleConfig::new("1", "mod_prettyreviews", "[1,2]");
        assert!(cfg.decode_params().is_err());
    }

    #[test]
    fn review_params_from_complete_map() {
        let cfg = ModuleConfig::new("1", "mod_prettyreviews", params_json());
        let p = ReviewParams::from_map(&cfg.decode_params().unwrap()).unwrap();
        assert_eq!(p.cid, "12345");
        assert_eq!(p.api_key, "AIza-test");
        assert_eq!(p.review_sort, "newest");
        assert_eq!(p.secret, "s3cr3t");
    }

    #[test]
    fn camel_case_aliases_are_accepted() {
        let cfg = ModuleConfig::new(
            "1",
            "mod_prettyreviews",
            r#"{"cid":"1","apiKey":"k","reviewSort":"most_relevant","secret":"s"}"#,
        );
        let p = ReviewParams::from_map(&cfg.decode_params().unwrap()).unwrap();
        assert_eq!(p.api_key, "k");
        assert_eq!(p.review_sort, "most_relevant");
    }

    #[rstest]
    #[case::no_cid(r#"{"apikey":"k","reviewsort":"newest","secret":"s"}"#, vec!["cid"])]
    #[case::empty_apikey(r#"{"cid":"1","apikey":"","reviewsort":"newest","secret":"s"}"#, vec!["apikey"])]
    #[case::null_sort(r#"{"cid":"1","apikey":"k","reviewsort":null,"secret":"s"}"#, vec!["reviewsort"])]
    #[case::no_secret(r#"{"cid":"1","apikey":"k","reviewsort":"newest"}"#, vec!["secret"])]
    #[case::empty(r#"{}"#, vec!["cid", "apikey", "reviewsort", "secret"])]
    fn missing_fields_are_reported(#[case] params: &str, #[case] expected: Vec<&str>) {
        let cfg = ModuleConfig::new("1", "mod_prettyreviews", params);
        let missing = ReviewParams::from_map(&cfg.decode_params().unwrap()).unwrap_err();
        assert_eq!(missing, expected);
    }

    #[test]
    fn record_accepts_module_column_name() {
        let cfg: ModuleConfig =
            serde_json::from_str(r#"{"id":"9","module":"mod_prettyreviews","params":"{}"}"#).unwrap();
        assert_eq!(cfg.kind, "mod_prettyreviews");
        assert_eq!(cfg.id.as_str(), "9");
    }
}
