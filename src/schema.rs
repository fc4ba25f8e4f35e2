//! schema.org JSON-LD graphs for creator pages.

use serde_json::{Map, Value, json};

use crate::normalize::InfluencerRecord;

const CONTEXT: &str = "https://schema.org";

/// `jobTitle` on every Person node.
pub const JOB_TITLE: &str = "Content Creator";

/// Country attached to every address. Locations are free text from the
/// backend and are not geocoded.
pub const ADDRESS_COUNTRY: &str = "India";

/// `{"@context", "@graph": [Person, BreadcrumbList?]}` for one creator.
///
/// The breadcrumb is only emitted when both a frontend base and a canonical
/// URL are known.
pub fn person_schema(record: &InfluencerRecord, frontend_base: Option<&str>) -> Value {
    let mut person = Map::new();
    person.insert("@type".into(), "Person".into());
    person.insert("name".into(), record.name.clone().into());
    person.insert("jobTitle".into(), JOB_TITLE.into());
    if let Some(url) = &record.canonical_url {
        person.insert("url".into(), url.clone().into());
    }
    if !record.image_url.is_empty() {
        person.insert("image".into(), record.image_url.clone().into());
    }
    if !record.bio.is_empty() {
        person.insert("description".into(), record.bio.clone().into());
    }
    if !record.location.is_empty() {
        person.insert(
            "address".into(),
            json!({
                "@type": "Place",
                "name": record.location,
                "address": {
                    "@type": "PostalAddress",
                    "addressLocality": record.location,
                    "addressCountry": ADDRESS_COUNTRY,
                },
            }),
        );
    }
    if !record.same_as.is_empty() {
        person.insert("sameAs".into(), record.same_as.clone().into());
    }

    let mut graph = vec![Value::Object(person)];
    if let (Some(base), Some(url)) = (frontend_base, &record.canonical_url) {
        graph.push(breadcrumbs(&[
            ("Home", format!("{base}/")),
            ("Creators", format!("{base}/creators")),
            (record.name.as_str(), url.clone()),
        ]));
    }

    json!({ "@context": CONTEXT, "@graph": graph })
}

/// `{"@context", "@graph": [BreadcrumbList, ItemList]}` for `/creators`.
///
/// Returns `None` without a frontend base: list item URLs would be
/// unresolvable. Only the first `cap` records are considered; unroutable ones
/// among them are dropped, and `position` counts the kept items.
pub fn creators_list_schema<'a>(
    records: impl IntoIterator<Item = &'a InfluencerRecord>,
    frontend_base: Option<&str>,
    cap: usize,
) -> Option<Value> {
    let base = frontend_base?;

    let items: Vec<Value> = records
        .into_iter()
        .take(cap)
        .filter(|record| record.is_routable())
        .enumerate()
        .map(|(i, record)| {
            let mut item = Map::new();
            item.insert("@type".into(), "ListItem".into());
            item.insert("position".into(), (i + 1).into());
            item.insert("url".into(), format!("{base}/creators/{}", record.slug).into());
            item.insert("name".into(), record.name.clone().into());
            if !record.image_url.is_empty() {
                item.insert("image".into(), record.image_url.clone().into());
            }
            Value::Object(item)
        })
        .collect();

    let list = json!({
        "@type": "ItemList",
        "name": "Creators",
        "numberOfItems": items.len(),
        "itemListElement": items,
    });
    let crumbs = breadcrumbs(&[
        ("Home", format!("{base}/")),
        ("Creators", format!("{base}/creators")),
    ]);

    Some(json!({ "@context": CONTEXT, "@graph": [crumbs, list] }))
}

fn breadcrumbs(trail: &[(&str, String)]) -> Value {
    let items: Vec<Value> = trail
        .iter()
        .enumerate()
        .map(|(i, (name, url))| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": name,
                "item": url,
            })
        })
        .collect();
    json!({ "@type": "BreadcrumbList", "itemListElement": items })
}
