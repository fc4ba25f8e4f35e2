//! Crawler-visible markup: static marketing pages and the bodies of the
//! creators list and profile pages.
//!
//! Everything interpolated from backend data goes through [`escape`].

use crate::html::escape;
use crate::normalize::InfluencerRecord;
use crate::writer::{DEFAULT_OG_IMAGE, OgType, SeoPageSpec};

pub const SITE_NAME: &str = "CreatorHub";

/// Profile descriptions are cut to this many characters.
const DESCRIPTION_LIMIT: usize = 160;

/// A fixed page rendered on every run.
pub struct StaticPage {
    pub route: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub body: &'static str,
}

pub const STATIC_PAGES: &[StaticPage] = &[
    StaticPage {
        route: "/about",
        title: "About CreatorHub",
        description: "CreatorHub connects brands with verified creators for influencer marketing campaigns.",
        body: "<main><h1>About CreatorHub</h1>\
               <p>CreatorHub is a marketplace where brands discover creators and creators grow paid partnerships.</p></main>",
    },
    StaticPage {
        route: "/contact",
        title: "Contact CreatorHub",
        description: "Get in touch with the CreatorHub team for partnerships, support and press.",
        body: "<main><h1>Contact us</h1>\
               <p>Write to support@creatorhub.example for help with your account or campaigns.</p></main>",
    },
    StaticPage {
        route: "/privacy",
        title: "Privacy Policy | CreatorHub",
        description: "How CreatorHub collects, uses and protects personal data.",
        body: "<main><h1>Privacy Policy</h1>\
               <p>We only collect the data needed to run the marketplace and never sell personal information.</p></main>",
    },
    StaticPage {
        route: "/terms",
        title: "Terms of Service | CreatorHub",
        description: "The terms that govern use of the CreatorHub marketplace.",
        body: "<main><h1>Terms of Service</h1>\
               <p>By using CreatorHub you agree to these terms and to our community guidelines.</p></main>",
    },
];

impl StaticPage {
    pub fn spec(&self) -> SeoPageSpec {
        SeoPageSpec {
            title: Some(self.title.to_owned()),
            description: Some(self.description.to_owned()),
            og_type: OgType::Website,
            body_html: Some(self.body.to_owned()),
            ..SeoPageSpec::new(self.route)
        }
    }
}

pub fn creators_list_title() -> String {
    format!("Creators | {SITE_NAME}")
}

pub fn creators_list_description(count: usize) -> String {
    format!("Browse {count} creators available for brand collaborations on {SITE_NAME}.")
}

/// Grid of link cards (avatar, name, handle) pointing at canonical profiles.
pub fn creators_list_body(records: &[&InfluencerRecord]) -> String {
    let mut out = String::from("<main><h1>Creators</h1><ul class=\"creator-grid\">");
    for record in records.iter().filter(|r| r.is_routable()) {
        let slug = escape(&record.slug);
        let name = escape(&record.name);
        let img = escape(avatar(record));
        out.push_str(&format!(
            "<li><a href=\"/creators/{slug}\"><img src=\"{img}\" alt=\"{name}\" loading=\"lazy\" />\
             <span class=\"name\">{name}</span><span class=\"handle\">@{slug}</span></a></li>"
        ));
    }
    out.push_str("</ul></main>");
    out
}

pub fn profile_title(record: &InfluencerRecord) -> String {
    format!("{} | {SITE_NAME}", record.name)
}

pub fn profile_description(record: &InfluencerRecord) -> String {
    if record.bio.is_empty() {
        return format!("{} is a creator on {SITE_NAME}. View their profile and collaborate.", record.name);
    }
    truncate(&record.bio, DESCRIPTION_LIMIT)
}

/// Header, avatar, bio and call to action for one creator.
pub fn profile_body(record: &InfluencerRecord) -> String {
    let name = escape(&record.name);
    let slug = escape(&record.slug);
    let img = escape(avatar(record));
    let mut out = format!(
        "<main><article class=\"creator-profile\"><header>\
         <img src=\"{img}\" alt=\"{name}\" /><h1>{name}</h1><p class=\"handle\">@{slug}</p>"
    );
    if !record.location.is_empty() {
        out.push_str(&format!("<p class=\"location\">{}</p>", escape(&record.location)));
    }
    out.push_str("</header>");
    if !record.bio.is_empty() {
        out.push_str(&format!("<section class=\"bio\"><p>{}</p></section>", escape(&record.bio)));
    }
    out.push_str(&format!(
        "<a class=\"cta\" href=\"/signup?creator={slug}\">Collaborate with {name}</a>"
    ));
    out.push_str("</article></main>");
    out
}

fn avatar(record: &InfluencerRecord) -> &str {
    if record.image_url.is_empty() { DEFAULT_OG_IMAGE } else { record.image_url.as_str() }
}

/// Cuts on a char boundary and appends an ellipsis when anything was dropped.
fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}…", text[..idx].trim_end()),
        None => text.to_owned(),
    }
}
