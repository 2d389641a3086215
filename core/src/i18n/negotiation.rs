//! `Accept-Language` negotiation against the supported locale set

use agro_shared::Locale;

/// Weight of a preference in thousandths (`q=0.8` is 800)
const MAX_QUALITY: u16 = 1000;

/// One entry of an `Accept-Language` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePreference {
    /// Lower-cased language range, e.g. `id`, `en-us` or `*`
    pub tag: String,
    /// Weight in thousandths, 0..=1000
    pub quality: u16,
}

impl LanguagePreference {
    pub fn new(tag: impl Into<String>, quality: u16) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            quality: quality.min(MAX_QUALITY),
        }
    }
}

/// Parse a header into preferences ordered by weight, client order kept on ties.
///
/// Entries with a malformed weight are dropped; so are `q=0` entries, which
/// mean "not acceptable".
pub fn parse_accept_language(header: &str) -> Vec<LanguagePreference> {
    let mut preferences: Vec<LanguagePreference> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';').map(str::trim);
            let tag = parts.next().filter(|t| !t.is_empty())?;
            let mut quality = MAX_QUALITY;
            for param in parts {
                if let Some(raw) = param.strip_prefix("q=").or_else(|| param.strip_prefix("Q=")) {
                    quality = parse_quality(raw)?;
                }
            }
            Some(LanguagePreference::new(tag, quality))
        })
        .filter(|pref| pref.quality > 0)
        .collect();

    // sort_by is stable, so equal weights keep the client's order
    preferences.sort_by(|a, b| b.quality.cmp(&a.quality));
    preferences
}

fn parse_quality(raw: &str) -> Option<u16> {
    let value: f32 = raw.trim().parse().ok()?;
    if !(0.0..=1.0).contains(&value) {
        return None;
    }
    Some((value * MAX_QUALITY as f32).round() as u16)
}

/// Pick the supported locale best matching the preferences.
///
/// Preferences are expected in priority order (as returned by
/// [`parse_accept_language`]). A preference matches a supported tag exactly
/// or by primary subtag (`en-GB` matches `en`); `*` matches the default.
/// Without any match the default is returned.
pub fn negotiate(preferences: &[LanguagePreference], supported: &[Locale], default: Locale) -> Locale {
    preferences
        .iter()
        .filter(|pref| pref.quality > 0)
        .find_map(|pref| match_tag(&pref.tag, supported, default))
        .unwrap_or(default)
}

/// Negotiate straight from an optional header value
pub fn negotiate_header(header: Option<&str>) -> Locale {
    match header {
        Some(value) => negotiate(&parse_accept_language(value), Locale::all(), Locale::DEFAULT),
        None => Locale::DEFAULT,
    }
}

fn match_tag(tag: &str, supported: &[Locale], default: Locale) -> Option<Locale> {
    if tag == "*" {
        return Some(default);
    }
    let tag = tag.to_ascii_lowercase();
    if let Some(exact) = supported.iter().find(|l| l.code() == tag) {
        return Some(*exact);
    }
    let primary = tag.split(['-', '_']).next().unwrap_or_default();
    supported.iter().copied().find(|l| l.code() == primary)
}
