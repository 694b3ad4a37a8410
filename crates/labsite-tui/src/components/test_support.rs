use labsite_core::controller::ControllerOptions;
use labsite_core::store::MediaPage;
use labsite_core::MediaController;

use crate::app_state::AppState;

/// Seven cards in newest-first document order, alternating news and video.
pub fn page_html(with_search: bool) -> String {
    let mut cards = String::new();
    for i in 0..7 {
        let (kind, link) = if i % 2 == 0 {
            ("news", format!(r#"data-url="https://news.example.org/{}""#, i))
        } else {
            ("youtube", format!(r#"data-embed="https://www.youtube.com/embed/v{}""#, i))
        };
        cards.push_str(&format!(
            r#"<article class="media-card" data-title="Entry {i}" data-date="2024-01-{day:02}"
                        data-type="{kind}" data-outlet="Outlet {i}" {link}></article>"#,
            i = i,
            day = 20 - i,
            kind = kind,
            link = link,
        ));
    }
    let search = if with_search {
        r#"<input id="mediaSearch">"#
    } else {
        ""
    };
    format!(
        r#"<html><head><title>Lab media</title></head><body>
           <button class="chip" data-filter="all"></button>
           <button class="chip" data-filter="news"></button>
           <button class="chip" data-filter="youtube"></button>
           {search}
           <select id="mediaSort"><option value="date_desc"></option><option value="title_asc"></option></select>
           <div id="mediaList">{cards}</div>
           <button id="pagePrev"></button><div id="pageNumbers"></div><button id="pageNext"></button>
           </body></html>"#
    )
}

pub fn state_with_page(with_search: bool) -> AppState {
    let page = MediaPage::parse(&page_html(with_search)).expect("fixture page parses");
    let media = MediaController::new(page.store, page.controls, ControllerOptions::default());
    AppState::new(media, page.title, "fixture.html".to_string())
}
