use url::Url;

/// Returns true when both URLs point at the same host and explicit port
///
/// The scheme is not compared, since scheme-less hrefs resolve to http while
/// the site itself is served over https.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use gazeta_scraper::url::same_site;
///
/// let a = Url::parse("https://www.business-gazeta.ru/news").unwrap();
/// let b = Url::parse("http://WWW.business-gazeta.ru/article/1").unwrap();
/// assert!(same_site(&a, &b));
/// ```
pub fn same_site(a: &Url, b: &Url) -> bool {
    match (a.host_str(), b.host_str()) {
        (Some(ha), Some(hb)) => ha.eq_ignore_ascii_case(hb) && a.port() == b.port(),
        _ => false,
    }
}
