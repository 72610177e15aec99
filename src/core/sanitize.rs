// src/core/sanitize.rs

/// Collapse whitespace runs to one space and trim the ends.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Drop a `?query` suffix from a URL. URLs without one come back unchanged.
pub fn strip_query(href: &str) -> &str {
    match href.find('?') {
        Some(i) => &href[..i],
        None => href,
    }
}

/// "Tel Aviv, Tel Aviv District, Israel" → "Tel Aviv"
pub fn city_only(location: &str) -> String {
    let city = location.split(',').next().unwrap_or("");
    normalize_ws(city)
}

/// First word of `words` found anywhere in `text`, ignoring case.
pub fn find_any_ci<'w>(text: &str, words: &'w [String]) -> Option<&'w str> {
    let text = text.to_lowercase();
    words
        .iter()
        .find(|w| !w.is_empty() && text.contains(&w.to_lowercase()))
        .map(|w| w.as_str())
}
