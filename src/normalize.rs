//! Maps loosely-shaped backend influencer JSON onto [`InfluencerRecord`].
//!
//! The backend has shipped several field names for the same concept over
//! time. Each canonical field is resolved by walking a declared list of
//! source keys and taking the first non-empty trimmed string; the tables
//! below are the whole mapping. [`normalize`] is total: any JSON value,
//! including non-objects, produces a record.

use serde::Serialize;
use serde_json::Value;

/// Source keys for the route slug, in priority order. The first two are
/// handles and may carry a leading `@`.
const SLUG_KEYS: &[&str] = &["slug", "handle", "handleDisplay"];
const NAME_KEYS: &[&str] = &["name", "displayName", "fullName"];
const BIO_KEYS: &[&str] = &["bio", "about"];
const IMAGE_KEYS: &[&str] = &["profilePicUrl", "profilePhotoUrl"];
const LOCATION_KEYS: &[&str] = &["location", "city", "state", "country"];
const SAME_AS_KEYS: &[&str] = &["instagramUrl", "youtubeUrl"];
const STATUS_KEYS: &[&str] = &["verificationStatus", "verifiedStatus"];
const FLAG_KEYS: &[&str] = &["isVerified", "verified"];

/// Status strings that count as verified (ASCII case-insensitive).
const VERIFIED_STATUSES: &[&str] = &["verified", "approved"];

/// Name used when neither a name nor a slug is available.
pub const FALLBACK_NAME: &str = "Creator";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verification {
    Verified,
    #[default]
    Unverified,
}

impl Verification {
    pub fn is_verified(self) -> bool {
        self == Self::Verified
    }
}

/// One influencer in canonical shape. Empty strings mean "not provided".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfluencerRecord {
    pub slug: String,
    pub name: String,
    pub bio: String,
    pub image_url: String,
    pub location: String,
    pub same_as: Vec<String>,
    /// `{frontend_base}/creators/{slug}`; `None` without a frontend base or slug.
    pub canonical_url: Option<String>,
    pub verification: Verification,
}

impl InfluencerRecord {
    /// Records without a slug have no route and must never be written.
    pub fn is_routable(&self) -> bool {
        !self.slug.is_empty()
    }
}

/// Normalizes one backend object. Never fails; unknown shapes only lower the
/// quality of the resulting record.
pub fn normalize(json: &Value, frontend_base: Option<&str>) -> InfluencerRecord {
    let slug = resolve_slug(json);
    let name = first_text(json, NAME_KEYS)
        .or_else(|| (!slug.is_empty()).then(|| slug.clone()))
        .unwrap_or_else(|| FALLBACK_NAME.to_owned());
    let canonical_url = match frontend_base {
        Some(base) if !slug.is_empty() => Some(format!("{base}/creators/{slug}")),
        _ => None,
    };

    InfluencerRecord {
        name,
        bio: first_text(json, BIO_KEYS).unwrap_or_default(),
        image_url: first_text(json, IMAGE_KEYS).unwrap_or_default(),
        location: first_text(json, LOCATION_KEYS).unwrap_or_default(),
        same_as: SAME_AS_KEYS.iter().filter_map(|key| text(json, key)).collect(),
        canonical_url,
        verification: resolve_verification(json),
        slug,
    }
}

/// The slug alone, for callers that only need to decide routability.
///
/// A slug must be exactly one plain path segment. Anything that could move
/// the route elsewhere (`.`, `..`, separators) resolves to empty, which makes
/// the record unroutable.
pub fn resolve_slug(json: &Value) -> String {
    first_text(json, SLUG_KEYS)
        .map(|raw| raw.trim_start_matches('@').trim().to_owned())
        .filter(|slug| is_path_segment(slug))
        .unwrap_or_default()
}

fn is_path_segment(slug: &str) -> bool {
    !slug.is_empty() && slug != "." && slug != ".." && !slug.contains(['/', '\\'])
}

/// An explicit status string wins over a boolean flag; absent both, the
/// record is unverified.
pub fn resolve_verification(json: &Value) -> Verification {
    if let Some(status) = first_text(json, STATUS_KEYS) {
        return if VERIFIED_STATUSES.iter().any(|v| status.eq_ignore_ascii_case(v)) {
            Verification::Verified
        } else {
            Verification::Unverified
        };
    }
    match FLAG_KEYS.iter().find_map(|key| json.get(key)?.as_bool()) {
        Some(true) => Verification::Verified,
        _ => Verification::Unverified,
    }
}

fn first_text(json: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| text(json, key))
}

/// Trimmed, non-empty string at `key`. Non-string values are ignored.
fn text(json: &Value, key: &str) -> Option<String> {
    let value = json.get(key)?.as_str()?.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: Option<&str> = Some("https://app.example.com");

    #[test]
    fn handle_is_stripped_into_slug() {
        let record = normalize(
            &json!({ "handle": "@jane", "name": "Jane Doe", "profilePicUrl": "https://x/a.jpg" }),
            BASE,
        );
        assert_eq!(record.slug, "jane");
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.image_url, "https://x/a.jpg");
        assert_eq!(
            record.canonical_url.as_deref(),
            Some("https://app.example.com/creators/jane")
        );
    }

    #[test]
    fn explicit_slug_wins_and_blank_sources_fall_through() {
        let record = normalize(&json!({ "slug": "jd", "handle": "@jane" }), None);
        assert_eq!(record.slug, "jd");

        let record = normalize(&json!({ "slug": "  ", "handle": "", "handleDisplay": "@@jd2 " }), None);
        assert_eq!(record.slug, "jd2");
    }

    #[test]
    fn all_blank_slug_sources_are_unroutable() {
        let record = normalize(&json!({ "slug": " ", "handle": "@", "handleDisplay": null, "name": "X" }), BASE);
        assert!(!record.is_routable());
        assert!(record.canonical_url.is_none());
    }

    #[test]
    fn slugs_that_escape_their_route_are_unroutable() {
        for handle in ["@..", ".", "@/", "a/b", "..\\x", " @.. "] {
            let record = normalize(&json!({ "handle": handle, "name": "X" }), BASE);
            assert!(!record.is_routable(), "{handle:?}");
            assert!(record.canonical_url.is_none());
        }
        assert_eq!(resolve_slug(&json!({ "slug": "..", "handle": "@jane" })), "");
        assert_eq!(resolve_slug(&json!({ "handle": "@jane.doe" })), "jane.doe");
    }

    #[test]
    fn name_falls_back_to_slug_then_literal() {
        assert_eq!(normalize(&json!({ "handle": "sam" }), None).name, "sam");
        assert_eq!(normalize(&json!({ "fullName": " Sam Roe " }), None).name, "Sam Roe");
        assert_eq!(normalize(&json!({}), None).name, FALLBACK_NAME);
    }

    #[test]
    fn text_fields_take_first_non_empty_source() {
        let record = normalize(
            &json!({
                "handle": "a",
                "bio": "",
                "about": "About me",
                "profilePhotoUrl": "/img/a.png",
                "location": " ",
                "city": "Pune",
                "country": "India",
            }),
            None,
        );
        assert_eq!(record.bio, "About me");
        assert_eq!(record.image_url, "/img/a.png");
        assert_eq!(record.location, "Pune");
    }

    #[test]
    fn same_as_keeps_order_and_drops_empties() {
        let record = normalize(
            &json!({ "instagramUrl": "https://instagram.com/a", "youtubeUrl": "" }),
            None,
        );
        assert_eq!(record.same_as, vec!["https://instagram.com/a".to_owned()]);

        let record = normalize(
            &json!({ "youtubeUrl": "https://youtube.com/@a", "instagramUrl": "https://instagram.com/a" }),
            None,
        );
        assert_eq!(record.same_as.len(), 2);
        assert!(record.same_as[0].contains("instagram"));
    }

    #[test]
    fn verification_prefers_status_over_flag() {
        let v = |j: Value| resolve_verification(&j);
        assert_eq!(v(json!({ "verificationStatus": "APPROVED" })), Verification::Verified);
        assert_eq!(v(json!({ "verifiedStatus": "verified" })), Verification::Verified);
        assert_eq!(
            v(json!({ "verificationStatus": "pending", "isVerified": true })),
            Verification::Unverified
        );
        assert_eq!(
            v(json!({ "verificationStatus": "", "verified": true })),
            Verification::Verified
        );
        assert_eq!(v(json!({ "isVerified": false })), Verification::Unverified);
        assert_eq!(v(json!({ "isVerified": "yes" })), Verification::Unverified);
        assert_eq!(v(json!({})), Verification::Unverified);
    }

    #[test]
    fn non_object_input_still_yields_a_record() {
        for input in [json!(null), json!(42), json!("jane"), json!([1, 2])] {
            let record = normalize(&input, BASE);
            assert!(!record.is_routable());
            assert_eq!(record.name, FALLBACK_NAME);
        }
    }
}
