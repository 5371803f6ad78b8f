//! Request - 送信する URL の組み立て
//!
//! query のフィールド名（`moduleId`, `cid`, `apiKey`, `reviewSort`, `secret`）は
//! リモート endpoint との契約なので変えない。

use crate::config::EndpointConfig;
use crate::domain::{ModuleId, ReviewParams};

/// `root_url` 配下のレビュー更新 URL を作る
///
/// config 由来の固定ペアも含め、すべてのキーと値を percent-encode する。
pub fn build_update_url(
    root_url: &str,
    endpoint: &EndpointConfig,
    module_id: &ModuleId,
    params: &ReviewParams,
) -> String {
    let mut url = format!(
        "{}/{}",
        root_url.trim_end_matches('/'),
        endpoint.path.trim_start_matches('/')
    );

    let fixed = endpoint
        .query
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()));
    let per_module = [
        ("moduleId", module_id.as_str()),
        ("cid", params.cid.as_str()),
        ("apiKey", params.api_key.as_str()),
        ("reviewSort", params.review_sort.as_str()),
        ("secret", params.secret.as_str()),
    ];

    let query = fixed
        .chain(per_module)
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    url.push('?');
    url.push_str(&query);
    url
}
