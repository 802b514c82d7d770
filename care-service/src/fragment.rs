//! Server-rendered hospital detail page served at `/hospitals/{id}/`.
//!
//! The page is a complete document; clients extract the `detail-page` region and inject their own
//! blocks at the top of `dpage-body`.

use care_flow::escape_html;

use crate::models::CatalogHospital;

/// Official portals of known government and insurance schemes, keyed by lower-cased name.
pub const SCHEME_URLS: &[(&str, &str)] = &[
    ("ayushman bharat pm-jay", "https://pmjay.gov.in"),
    ("pmjay", "https://pmjay.gov.in"),
    ("pm-jay", "https://pmjay.gov.in"),
    ("mukhyamantri amrutum yojana", "https://magujarat.com"),
    ("ma yojana", "https://magujarat.com"),
    ("cghs", "https://cghs.gov.in"),
    ("central government health scheme", "https://cghs.gov.in"),
    ("esic", "https://esic.gov.in"),
    ("employees state insurance", "https://esic.gov.in"),
    ("esi", "https://esic.gov.in"),
    ("rashtriya swasthya bima yojana", "https://rsby.gov.in"),
    ("rsby", "https://rsby.gov.in"),
    ("pradhan mantri jan arogya yojana", "https://pmjay.gov.in"),
];

pub fn scheme_url(scheme_name: &str) -> Option<&'static str> {
    let wanted = scheme_name.trim().to_lowercase();
    SCHEME_URLS
        .iter()
        .find(|(name, _)| *name == wanted)
        .map(|(_, url)| *url)
}

pub fn render_detail_page(hospital: &CatalogHospital) -> String {
    let mut body = format!(
        r#"<section class="dpage-contact"><p class="dpage-address">{}, {} {}</p>"#,
        escape_html(&hospital.address),
        escape_html(&hospital.city),
        escape_html(&hospital.pincode),
    );
    if let Some(contact) = &hospital.contact {
        body.push_str(&format!(
            r#"<p class="dpage-phone"><a href="tel:{0}">{0}</a></p>"#,
            escape_html(contact)
        ));
    }
    if let Some(url) = hospital.map_url() {
        body.push_str(&format!(
            r#"<p class="dpage-map"><a href="{}">Directions</a></p>"#,
            escape_html(&url)
        ));
    }
    body.push_str("</section>");

    if let Some(beds) = hospital.total_beds {
        body.push_str(&format!(r#"<p class="dpage-beds">{beds} beds</p>"#));
    }

    if !hospital.specialities.is_empty() {
        body.push_str(r#"<section class="dpage-specialities"><h2>Specialities</h2><ul>"#);
        for speciality in &hospital.specialities {
            body.push_str(&format!("<li>{}</li>", escape_html(speciality)));
        }
        body.push_str("</ul></section>");
    }

    if !hospital.accepted_schemes.is_empty() {
        body.push_str(r#"<section class="dpage-schemes"><h2>Accepted Schemes</h2><ul>"#);
        for scheme in &hospital.accepted_schemes {
            let name = escape_html(&scheme.scheme_name);
            body.push_str(&match scheme_url(&scheme.scheme_name) {
                Some(url) => format!(r#"<li><a href="{url}">{name}</a></li>"#),
                None => format!("<li>{name}</li>"),
            });
        }
        body.push_str("</ul></section>");
    }

    let rating = hospital
        .rating
        .map(|rating| format!(r#"<span class="dpage-rating">★ {rating}</span>"#))
        .unwrap_or_default();

    format!(
        concat!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{name}</title></head><body>",
            r#"<main class="detail-page">"#,
            r#"<header class="dpage-header"><h1>{name}</h1>"#,
            r#"<span class="dpage-type">{kind}</span>{rating}</header>"#,
            r#"<div class="dpage-body">{body}</div>"#,
            "</main></body></html>"
        ),
        name = escape_html(&hospital.name),
        kind = escape_html(hospital.hospital_type.as_deref().unwrap_or("Hospital")),
        rating = rating,
        body = body,
    )
}
