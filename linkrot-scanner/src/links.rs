use scraper::Html;
use std::collections::HashSet;

/// How a single `href` value is treated by the crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind {
    /// Same-site page, already resolved against the seed
    Local(String),
    /// Anything that is neither local nor a fragment, kept verbatim
    External(String),
    /// `#anchor` on the current page
    Fragment,
}

/// Links found on one page, each list deduplicated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    pub local: Vec<String>,
    pub external: Vec<String>,
}

/// Classify an href. Local links are resolved by prefixing `base_url`, which
/// is the crawl seed rather than the page the href was found on.
pub fn classify_href(href: &str, base_url: &str) -> LinkKind {
    if href.starts_with('/') {
        LinkKind::Local(format!("{}{}", base_url, href))
    } else if href.starts_with('#') {
        LinkKind::Fragment
    } else {
        LinkKind::External(href.to_string())
    }
}

/// Parse `html` and collect the href of every `<a>` element, walking the
/// document depth-first. Anchors without an href are skipped.
pub fn extract_links(html: &str, base_url: &str) -> PageLinks {
    let document = Html::parse_document(html);

    let mut links = PageLinks::default();
    let mut seen_local = HashSet::new();
    let mut seen_external = HashSet::new();

    for node in document.tree.root().descendants() {
        let Some(element) = node.value().as_element() else {
            continue;
        };
        if element.name() != "a" {
            continue;
        }
        let Some(href) = element.attr("href") else {
            continue;
        };

        match classify_href(href, base_url) {
            LinkKind::Local(url) => {
                if seen_local.insert(url.clone()) {
                    links.local.push(url);
                }
            }
            LinkKind::External(url) => {
                if seen_external.insert(url.clone()) {
                    links.external.push(url);
                }
            }
            LinkKind::Fragment => {}
        }
    }

    links
}
