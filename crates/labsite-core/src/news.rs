//! External news links carried by activity cards in the overlay partials.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use crate::error::SiteError;
use crate::media::non_empty;
use crate::store::{collapse_whitespace, selector};

const SEL_NEWS_CARD: &str = ".activity-card.has-news[data-news-url]";
const SEL_HEADING: &str = "h1, h2, h3, h4, h5, h6";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsLink {
    pub title: String,
    pub url: String,
}

/// Collect news links in document order. Cards with a blank URL are skipped,
/// and a card without any title falls back to its URL.
pub fn extract_news(html: &str) -> Result<Vec<NewsLink>, SiteError> {
    let fragment = Html::parse_fragment(html);
    let card_sel = selector(SEL_NEWS_CARD)?;
    let heading_sel = selector(SEL_HEADING)?;

    Ok(fragment
        .select(&card_sel)
        .filter_map(|card| news_link(card, &heading_sel))
        .collect())
}

fn news_link(card: ElementRef<'_>, heading_sel: &Selector) -> Option<NewsLink> {
    let url = card.value().attr("data-news-url").and_then(non_empty)?;
    let title = card
        .value()
        .attr("data-title")
        .and_then(non_empty)
        .or_else(|| {
            card.select(heading_sel)
                .next()
                .and_then(|h| non_empty(&collapse_whitespace(&h.text().collect::<String>())))
        })
        .unwrap_or_else(|| url.clone());
    Some(NewsLink { title, url })
}
