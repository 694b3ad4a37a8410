#![allow(dead_code)]

/// One card of the generated media page.
pub struct Card {
    pub title: &'static str,
    pub date: &'static str,
    pub kind: &'static str,
    pub outlet: &'static str,
    pub keywords: &'static str,
}

/// Twelve cards, one per month of 2023, deliberately out of date order.
pub const CARDS: &[Card] = &[
    Card { title: "quantum sensing primer", date: "2023-03-14", kind: "news", outlet: "Science Daily", keywords: "sensing" },
    Card { title: "Lab open house", date: "2023-11-02", kind: "news", outlet: "Campus Post", keywords: "event" },
    Card { title: "Spin qubits explained", date: "2023-01-20", kind: "youtube", outlet: "Lab Channel", keywords: "qubit, lecture" },
    Card { title: "Award ceremony", date: "2023-07-08", kind: "news", outlet: "Korea Herald", keywords: "award" },
    Card { title: "Cryostat tour", date: "2023-05-30", kind: "youtube", outlet: "Lab Channel", keywords: "tour" },
    Card { title: "Interview with the PI", date: "2023-12-11", kind: "news", outlet: "Tech Weekly", keywords: "interview" },
    Card { title: "Noise in superconducting circuits", date: "2023-02-17", kind: "news", outlet: "Physics Today", keywords: "noise" },
    Card { title: "Graduate seminar", date: "2023-09-05", kind: "youtube", outlet: "Lab Channel", keywords: "seminar" },
    Card { title: "Best poster prize", date: "2023-04-22", kind: "news", outlet: "Campus Post", keywords: "award, poster" },
    Card { title: "Outreach day", date: "2023-10-19", kind: "news", outlet: "City News", keywords: "outreach" },
    Card { title: "New grant announced", date: "2023-06-12", kind: "news", outlet: "Research Wire", keywords: "funding" },
    Card { title: "Summer school recap", date: "2023-08-27", kind: "youtube", outlet: "Lab Channel", keywords: "school" },
];

pub fn card_html(card: &Card, idx: usize) -> String {
    let media = if card.kind == "youtube" {
        format!(r#"data-embed="https://www.youtube.com/embed/vid{idx}""#)
    } else {
        format!(r#"data-url="https://news.example.org/{idx}""#)
    };
    format!(
        r#"<article class="media-card" data-title="{}" data-date="{}" data-type="{}"
                 data-outlet="{}" data-keywords="{}" {}></article>"#,
        card.title, card.date, card.kind, card.outlet, card.keywords, media
    )
}

/// A media page with every control present.
pub fn media_page() -> String {
    page_with(true, true, true)
}

pub fn page_with(search: bool, sort: bool, pager: bool) -> String {
    let cards: String = CARDS
        .iter()
        .enumerate()
        .map(|(i, c)| card_html(c, i))
        .collect::<Vec<_>>()
        .join("\n");
    let search = if search {
        r#"<input id="mediaSearch" type="search">"#
    } else {
        ""
    };
    let sort = if sort {
        r#"<select id="mediaSort">
             <option value="date_desc">Newest first</option>
             <option value="date_asc">Oldest first</option>
             <option value="title_asc">Title A-Z</option>
           </select>"#
    } else {
        ""
    };
    let pager = if pager {
        r#"<button id="pagePrev">Prev</button><div id="pageNumbers"></div><button id="pageNext">Next</button>"#
    } else {
        ""
    };
    format!(
        r#"<!doctype html><html><head><title>Media</title></head><body>
           <div class="chips">
             <button class="chip active" data-filter="all">All</button>
             <button class="chip" data-filter="news">News</button>
             <button class="chip" data-filter="youtube">Video</button>
           </div>
           {search}
           {sort}
           <div id="mediaList">
           {cards}
           </div>
           {pager}
           </body></html>"#
    )
}
