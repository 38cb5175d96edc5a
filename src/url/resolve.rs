use crate::config::Config;
use crate::url::{same_site, LinkKind};
use crate::{UrlError, UrlResult};
use scraper::ElementRef;
use url::Url;

/// Scheme given to hrefs that name a host but carry no scheme
pub const FALLBACK_SCHEME: &str = "http";

/// Path endings that look like a host label but are really file names
const FILE_EXTENSIONS: &[&str] = &["html", "htm", "shtml", "php", "asp", "aspx", "jsp"];

/// Resolves anchors against the fixed site origin
///
/// # Resolution Rules
///
/// 1. Empty, fragment-only and `javascript:`/`mailto:`/`tel:`/`data:` hrefs
///    do not resolve
/// 2. Absolute `http(s)` URLs are kept as they are
/// 3. Hrefs that start with a host name (`www.example.com/news/1`) get the
///    [`FALLBACK_SCHEME`]
/// 4. Everything else is joined against the base URL
///
/// Fragments are dropped from resolved URLs.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    base: Url,
    article_prefixes: Vec<String>,
}

impl LinkResolver {
    /// Creates a resolver for the site at `base_url`
    ///
    /// # Arguments
    ///
    /// * `base_url` - Absolute http(s) origin of the site
    /// * `article_prefixes` - Path prefixes that identify article pages
    pub fn new(base_url: &str, article_prefixes: Vec<String>) -> UrlResult<Self> {
        let base = Url::parse(base_url).map_err(|e| UrlError::Parse(e.to_string()))?;

        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(UrlError::InvalidScheme(base.scheme().to_string()));
        }

        Ok(Self {
            base,
            article_prefixes,
        })
    }

    /// Creates a resolver from the site and crawler sections of the config
    pub fn from_config(config: &Config) -> UrlResult<Self> {
        Self::new(
            &config.site.base_url,
            config.crawler.article_path_prefixes.clone(),
        )
    }

    /// Resolves the `href` of an anchor element
    ///
    /// Returns `None` if the element has no `href` or it does not resolve.
    pub fn resolve(&self, element: ElementRef<'_>) -> Option<Url> {
        element
            .value()
            .attr("href")
            .and_then(|href| self.resolve_href(href))
    }

    /// Resolves a raw `href` value
    ///
    /// # Examples
    ///
    /// ```
    /// use gazeta_scraper::url::LinkResolver;
    ///
    /// let resolver = LinkResolver::new("https://www.business-gazeta.ru/", vec![]).unwrap();
    ///
    /// let url = resolver.resolve_href("/news/123").unwrap();
    /// assert_eq!(url.as_str(), "https://www.business-gazeta.ru/news/123");
    ///
    /// let url = resolver.resolve_href("example.com/news/1").unwrap();
    /// assert_eq!(url.as_str(), "http://example.com/news/1");
    /// ```
    pub fn resolve_href(&self, href: &str) -> Option<Url> {
        let href = href.trim();

        if is_unresolvable(href) {
            return None;
        }

        let mut resolved = match Url::parse(href) {
            Ok(absolute) => absolute,
            Err(_) if looks_like_bare_host(href) => {
                Url::parse(&format!("{}://{}", FALLBACK_SCHEME, href)).ok()?
            }
            Err(_) => self.base.join(href).ok()?,
        };

        if resolved.scheme() != "http" && resolved.scheme() != "https" {
            return None;
        }

        resolved.set_fragment(None);
        Some(resolved)
    }

    /// Returns true if `url` is an article page on the target site
    pub fn is_article(&self, url: &Url) -> bool {
        same_site(url, &self.base)
            && self
                .article_prefixes
                .iter()
                .any(|prefix| url.path().starts_with(prefix.as_str()))
    }

    /// Classifies an anchor found while scanning the listing page `current`
    ///
    /// An href is an [`LinkKind::Article`] when it resolves to an article path on
    /// the target site. Otherwise it is resolved against `current` and becomes a
    /// [`LinkKind::Listing`] candidate if it stays on `current`'s site.
    pub fn classify(&self, href: &str, current: &Url) -> LinkKind {
        if let Some(url) = self.resolve_href(href) {
            if self.is_article(&url) {
                return LinkKind::Article(url);
            }
        }

        let href = href.trim();
        if is_unresolvable(href) {
            return LinkKind::Unrecognized;
        }

        match current.join(href) {
            Ok(mut url)
                if (url.scheme() == "http" || url.scheme() == "https")
                    && same_site(&url, current) =>
            {
                url.set_fragment(None);
                LinkKind::Listing(url)
            }
            _ => LinkKind::Unrecognized,
        }
    }
}

/// Hrefs that never point at another page
fn is_unresolvable(href: &str) -> bool {
    href.is_empty()
        || href.starts_with('#')
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
}

/// True for hrefs like `www.example.com/path` whose first segment is a host name
fn looks_like_bare_host(href: &str) -> bool {
    if href.starts_with('/') || href.starts_with('.') {
        return false;
    }

    let host = href.split(['/', '?', '#']).next().unwrap_or_default();
    let Some((name, tld)) = host.rsplit_once('.') else {
        return false;
    };

    !name.is_empty()
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
        && !FILE_EXTENSIONS.contains(&tld.to_ascii_lowercase().as_str())
}
