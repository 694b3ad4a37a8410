//! Card store: media entries and page controls scraped from the media page.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use crate::error::SiteError;
use crate::media::{non_empty, parse_date, youtube_thumbnail, MediaEntry};
use crate::selection::SortMode;

const SEL_LIST: &str = "#mediaList";
const SEL_CARD: &str = ".media-card";
const SEL_THUMB: &str = ".media-thumb img";
const SEL_CHIP: &str = ".chip[data-filter]";
const SEL_SEARCH: &str = "#mediaSearch";
const SEL_SORT_OPTION: &str = "#mediaSort option";
const SEL_SORT: &str = "#mediaSort";
const SEL_PAGE_PREV: &str = "#pagePrev";
const SEL_PAGE_NEXT: &str = "#pageNext";
const SEL_PAGE_NUMBERS: &str = "#pageNumbers";
const SEL_TITLE: &str = "title";

/// Immutable set of entries in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardStore {
    entries: Vec<MediaEntry>,
}

impl CardStore {
    pub fn new(entries: Vec<MediaEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MediaEntry] {
        &self.entries
    }

    pub fn get(&self, idx: usize) -> Option<&MediaEntry> {
        self.entries.get(idx)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Which interactive controls the page ships. A missing control disables
/// its feature instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageControls {
    /// `data-filter` values of the chips, in document order, deduplicated.
    pub filters: Vec<String>,
    pub search: bool,
    /// Sort modes offered by the selector; empty when there is no selector.
    pub sort_modes: Vec<SortMode>,
    /// True only when prev, next and the page-number container all exist.
    pub pagination: bool,
}

impl PageControls {
    /// Every control present, with the given chips.
    pub fn full(filters: Vec<String>) -> Self {
        Self {
            filters,
            search: true,
            sort_modes: SortMode::ALL.to_vec(),
            pagination: true,
        }
    }

    pub fn has_sort(&self) -> bool {
        !self.sort_modes.is_empty()
    }

    pub fn has_filter(&self, filter: &str) -> bool {
        self.filters.iter().any(|f| f == filter)
    }
}

#[derive(Debug, Clone)]
pub struct MediaPage {
    pub title: Option<String>,
    pub store: CardStore,
    pub controls: PageControls,
}

impl MediaPage {
    /// Parse a full HTML document. Fails only when the page has no media list.
    pub fn parse(html: &str) -> Result<Self, SiteError> {
        let document = Html::parse_document(html);

        let list_sel = selector(SEL_LIST)?;
        let list = document
            .select(&list_sel)
            .next()
            .ok_or(SiteError::NoMediaList)?;

        let card_sel = selector(SEL_CARD)?;
        let thumb_sel = selector(SEL_THUMB)?;
        let entries = list
            .select(&card_sel)
            .map(|card| parse_card(card, &thumb_sel))
            .collect::<Vec<_>>();

        let title_sel = selector(SEL_TITLE)?;
        let title = document
            .select(&title_sel)
            .next()
            .and_then(|t| non_empty(&collapse_whitespace(&t.text().collect::<String>())));

        let controls = parse_controls(&document)?;

        Ok(Self {
            title,
            store: CardStore::new(entries),
            controls,
        })
    }
}

fn parse_card(card: ElementRef<'_>, thumb_sel: &Selector) -> MediaEntry {
    let attr = |name: &str| card.value().attr(name).unwrap_or("").to_string();

    let kind = attr("data-type");
    let embed = attr("data-embed");

    let thumbnail_url = card
        .select(thumb_sel)
        .next()
        .and_then(|img| img.value().attr("src"))
        .and_then(non_empty)
        .or_else(|| youtube_thumbnail(&kind, &embed));

    MediaEntry {
        title: attr("data-title"),
        outlet: attr("data-outlet"),
        keywords: attr("data-keywords"),
        date: parse_date(&attr("data-date")),
        kind,
        embed_url: non_empty(&embed),
        detail_url: non_empty(&attr("data-url")),
        thumbnail_url,
    }
}

fn parse_controls(document: &Html) -> Result<PageControls, SiteError> {
    let exists = |css: &'static str| -> Result<bool, SiteError> {
        Ok(document.select(&selector(css)?).next().is_some())
    };

    let mut filters: Vec<String> = Vec::new();
    for chip in document.select(&selector(SEL_CHIP)?) {
        let value = chip.value().attr("data-filter").unwrap_or("").trim();
        let value = if value.is_empty() {
            crate::selection::ALL_FILTER
        } else {
            value
        };
        if !filters.iter().any(|f| f == value) {
            filters.push(value.to_string());
        }
    }

    let sort_modes = if exists(SEL_SORT)? {
        let mut modes: Vec<SortMode> = Vec::new();
        for option in document.select(&selector(SEL_SORT_OPTION)?) {
            let value = option
                .value()
                .attr("value")
                .map(str::to_string)
                .unwrap_or_else(|| option.text().collect::<String>());
            if let Some(mode) = SortMode::from_value(&value) {
                if !modes.contains(&mode) {
                    modes.push(mode);
                }
            }
        }
        if modes.is_empty() {
            SortMode::ALL.to_vec()
        } else {
            modes
        }
    } else {
        Vec::new()
    };

    Ok(PageControls {
        filters,
        search: exists(SEL_SEARCH)?,
        sort_modes,
        pagination: exists(SEL_PAGE_PREV)? && exists(SEL_PAGE_NEXT)? && exists(SEL_PAGE_NUMBERS)?,
    })
}

pub(crate) fn selector(css: &'static str) -> Result<Selector, SiteError> {
    Selector::parse(css).map_err(|_| SiteError::Selector(css))
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
