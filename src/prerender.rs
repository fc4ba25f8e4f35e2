//! Build-time prerender run.
//!
//! Order of work:
//! 1. static marketing pages, unconditionally;
//! 2. without an API base, stop here (warned, not an error);
//! 3. fetch the first page of influencers; an empty list ends the run;
//! 4. `/creators`, built from verified creators (all creators when none are
//!    verified), best effort;
//! 5. every fetched creator, verified or not: fetch detail (falling back to
//!    the list item), then write `/creators/{slug}` and `/influencer/{slug}`,
//!    both canonical to the former.
//!
//! Only a missing template or a failed static page aborts the run. List fetch
//! failure skips the influencer batch; everything after that is per item.

use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::Error;
use crate::normalize::{InfluencerRecord, normalize, resolve_slug};
use crate::pages::{self, STATIC_PAGES};
use crate::schema;
use crate::writer::{OgType, RouteWriter, SeoPageSpec};

/// What a run produced.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct PrerenderReport {
    pub static_pages: usize,
    pub list_page: bool,
    /// Creators with both routes written.
    pub profiles_written: usize,
    /// Items without a slug.
    pub skipped: usize,
    /// Items whose detail fetch failed, or returned something other than an
    /// object, and were rendered from the list item.
    pub detail_fallbacks: usize,
    /// Items where at least one route failed to write.
    pub failed: usize,
}

/// Runs the whole pipeline against `config`.
pub async fn run(config: &Config) -> Result<PrerenderReport, Error> {
    let writer = RouteWriter::from_config(config)?;
    let mut report = PrerenderReport::default();

    render_static_pages(&writer, &mut report)?;

    let Some(api_base) = config.api_base.as_deref() else {
        warn!("API_BASE_URL not set, skipping influencer prerendering");
        return Ok(report);
    };
    let api = ApiClient::new(api_base, config.timeout)?;
    render_influencers(&api, &writer, config, &mut report).await;

    info!(
        static_pages = report.static_pages,
        list_page = report.list_page,
        profiles = report.profiles_written,
        skipped = report.skipped,
        fallbacks = report.detail_fallbacks,
        failed = report.failed,
        "prerender finished"
    );
    Ok(report)
}

fn render_static_pages(writer: &RouteWriter, report: &mut PrerenderReport) -> Result<(), Error> {
    for page in STATIC_PAGES {
        writer.write(&page.spec())?;
        report.static_pages += 1;
    }
    debug!(count = report.static_pages, "static pages written");
    Ok(())
}

async fn render_influencers(
    api: &ApiClient,
    writer: &RouteWriter,
    config: &Config,
    report: &mut PrerenderReport,
) {
    let items = match api.list_influencers(config.page_size, 0).await {
        Ok(items) => items,
        Err(e) => {
            warn!(error = %e, "influencer list fetch failed, skipping influencer pages");
            return;
        }
    };
    if items.is_empty() {
        info!("influencer list is empty, nothing to prerender");
        return;
    }
    info!(count = items.len(), "prerendering influencers");

    let base = config.frontend_base();
    let records: Vec<InfluencerRecord> = items.iter().map(|item| normalize(item, base)).collect();

    let listed = listing_candidates(&records, config.list_cap);
    match write_list_page(writer, &listed, config) {
        Ok(()) => report.list_page = true,
        Err(e) => warn!(error = %e, "creators list page failed"),
    }

    for item in &items {
        let slug = resolve_slug(item);
        if slug.is_empty() {
            debug!("influencer without slug skipped");
            report.skipped += 1;
            continue;
        }

        let detail = match api.influencer(&slug).await {
            Ok(detail) if detail.is_object() => detail,
            Ok(_) => {
                debug!(%slug, "detail is not an object, using list item");
                report.detail_fallbacks += 1;
                item.clone()
            }
            Err(e) => {
                debug!(%slug, error = %e, "detail fetch failed, using list item");
                report.detail_fallbacks += 1;
                item.clone()
            }
        };

        match write_profile(writer, &slug, detail, base) {
            Ok(()) => report.profiles_written += 1,
            Err(e) => {
                warn!(%slug, error = %e, "profile prerender failed");
                report.failed += 1;
            }
        }
    }
}

/// Verified creators first-come, capped; all creators, capped, when none are
/// verified.
pub fn listing_candidates(records: &[InfluencerRecord], cap: usize) -> Vec<&InfluencerRecord> {
    let verified: Vec<&InfluencerRecord> = records
        .iter()
        .filter(|r| r.verification.is_verified())
        .take(cap)
        .collect();
    if verified.is_empty() {
        records.iter().take(cap).collect()
    } else {
        verified
    }
}

fn write_list_page(writer: &RouteWriter, listed: &[&InfluencerRecord], config: &Config) -> Result<(), Error> {
    let routable = listed.iter().filter(|r| r.is_routable()).count();
    let spec = SeoPageSpec {
        title: Some(pages::creators_list_title()),
        description: Some(pages::creators_list_description(routable)),
        og_type: OgType::Website,
        schema: schema::creators_list_schema(listed.iter().copied(), config.frontend_base(), config.list_cap),
        body_html: Some(pages::creators_list_body(listed)),
        window_data: Some(json!({ "creators": listed })),
        ..SeoPageSpec::new("/creators")
    };
    writer.write(&spec)?;
    Ok(())
}

/// Writes the canonical route and its back-compat alias for one creator.
fn write_profile(writer: &RouteWriter, slug: &str, mut detail: Value, base: Option<&str>) -> Result<(), Error> {
    let mut record = normalize(&detail, base);
    if !record.is_routable() {
        // Detail payloads sometimes omit the slug the list already resolved.
        if let Value::Object(map) = &mut detail {
            map.insert("slug".to_owned(), Value::String(slug.to_owned()));
        }
        record = normalize(&detail, base);
    }
    if !record.is_routable() {
        record = normalize(&json!({ "slug": slug }), base);
    }

    let canonical_route = format!("/creators/{}", record.slug);
    let spec = SeoPageSpec {
        title: Some(pages::profile_title(&record)),
        description: Some(pages::profile_description(&record)),
        canonical: record.canonical_url.clone().or_else(|| Some(canonical_route.clone())),
        og_image: (!record.image_url.is_empty()).then(|| record.image_url.clone()),
        og_type: OgType::Profile,
        schema: Some(schema::person_schema(&record, base)),
        body_html: Some(pages::profile_body(&record)),
        window_data: Some(json!({ "influencer": detail })),
        ..SeoPageSpec::new(canonical_route)
    };

    writer.write(&spec)?;
    writer.write(&SeoPageSpec {
        route: format!("/influencer/{}", record.slug),
        ..spec
    })?;
    Ok(())
}
