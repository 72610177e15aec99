// src/query.rs
use tracing::debug;
use urlencoding::encode;

/// One search-results URL per title phrase, in input order.
/// Titles are not validated here; a bad phrase shows up later as an
/// invalid results page.
pub fn build_urls(base_url: &str, job_titles: &[String], country: &str) -> Vec<String> {
    let region = encode(country.trim());
    job_titles
        .iter()
        .map(|title| {
            let phrase = encode(title.trim());
            let url = join!(base_url, "?keywords=", &phrase, "&location=", &region);
            debug!(%url, "built search url");
            url
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.linkedin.com/jobs/search";

    #[test]
    fn spaces_become_percent_20() {
        let urls = build_urls(BASE, &[s!("student software")], "Israel");
        assert_eq!(
            urls,
            vec![s!("https://www.linkedin.com/jobs/search?keywords=student%20software&location=Israel")]
        );
    }

    #[test]
    fn one_url_per_title_in_order() {
        let titles = vec![s!("intern"), s!("junior data analyst")];
        let urls = build_urls(BASE, &titles, "United States");
        assert_eq!(urls.len(), 2);
        assert!(urls[0].contains("keywords=intern&"));
        assert!(urls[1].contains("keywords=junior%20data%20analyst&"));
        assert!(urls.iter().all(|u| u.ends_with("&location=United%20States")));
    }
}
