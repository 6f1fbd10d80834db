//! Source-link canonicalization used as the strict dedup key.

use url::form_urlencoded;
use url::Url;

/// Query parameters added by ad and newsletter platforms. Matched
/// case-insensitively and always removed.
const TRACKING_PARAMS: [&str; 12] = [
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "gclid",
    "gbraid",
    "wbraid",
    "fbclid",
    "mc_cid",
    "mc_eid",
    "msclkid",
];

/// Reduce a source link to a comparable key.
///
/// The key is `scheme://host/path?query` with the host lower-cased and any
/// leading `www.` removed, tracking parameters dropped, repeated slashes
/// collapsed and a trailing slash stripped. Port, credentials and fragment
/// are not part of the key. Remaining parameters keep their order.
///
/// Returns `None` for an absent, empty or unparseable link; such articles can
/// only be matched by title.
#[must_use]
pub fn canonicalize_url(raw: Option<&str>) -> Option<String> {
    let raw = raw.filter(|s| !s.is_empty())?;
    let url = Url::parse(raw).ok()?;

    let host = url.host_str().unwrap_or_default().to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    let path = collapse_path(url.path());

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| !is_tracking_param(name))
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();
    let query = if kept.is_empty() {
        String::new()
    } else {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&kept)
            .finish();
        format!("?{encoded}")
    };

    Some(format!("{}://{host}{path}{query}", url.scheme()))
}

fn is_tracking_param(name: &str) -> bool {
    TRACKING_PARAMS
        .iter()
        .any(|param| name.eq_ignore_ascii_case(param))
}

/// Collapse runs of `/` and drop one trailing `/` unless the path is the root.
fn collapse_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for ch in path.chars() {
        if ch == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(ch);
    }
    if out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}
