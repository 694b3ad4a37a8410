use std::path::Path;
use std::process::Command;

fn page_html() -> String {
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
    format!(
        r#"<html><head><title>Lab media</title></head><body>
           <button class="chip" data-filter="all"></button>
           <button class="chip" data-filter="news"></button>
           <button class="chip" data-filter="youtube"></button>
           <input id="mediaSearch">
           <select id="mediaSort"><option value="date_desc"></option><option value="title_asc"></option></select>
           <div id="mediaList">{cards}</div>
           <button id="pagePrev"></button><div id="pageNumbers"></div><button id="pageNext"></button>
           </body></html>"#
    )
}

fn run_print(dir: &Path, extra: &[&str]) -> serde_json::Value {
    let page = dir.join("media.html");
    std::fs::write(&page, page_html()).unwrap();
    let config = dir.join("config.toml");
    std::fs::write(&config, "").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_labsite"))
        .arg(&page)
        .arg("--print")
        .arg("--no-partials")
        .arg("--config")
        .arg(&config)
        .args(extra)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_print_first_page() {
    let dir = tempfile::tempdir().unwrap();
    let view = run_print(dir.path(), &[]);

    assert_eq!(view["filter"], "all");
    assert_eq!(view["sort"], "date_desc");
    assert_eq!(view["page"], 1);
    assert_eq!(view["page_count"], 2);
    assert_eq!(view["match_count"], 7);
    assert_eq!(view["entries"].as_array().unwrap().len(), 5);
    assert_eq!(view["entries"][0]["title"], "Entry 0");
    assert_eq!(view["entries"][0]["date"], "2024-01-20");
    assert_eq!(view["pagination"]["prev_disabled"], true);
    assert_eq!(view["pagination"]["next_disabled"], false);
}

#[test]
fn test_print_with_selection_flags() {
    let dir = tempfile::tempdir().unwrap();
    let view = run_print(
        dir.path(),
        &["--filter", "youtube", "--sort", "title_asc", "--page", "9"],
    );

    assert_eq!(view["filter"], "youtube");
    assert_eq!(view["sort"], "title_asc");
    assert_eq!(view["page"], 1);
    assert_eq!(view["match_count"], 3);
    let titles: Vec<&str> = view["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Entry 1", "Entry 3", "Entry 5"]);
    assert_eq!(view["entries"][0]["type"], "youtube");
}

#[test]
fn test_unknown_chip_keeps_all() {
    let dir = tempfile::tempdir().unwrap();
    let view = run_print(dir.path(), &["--filter", "podcast", "--query", "entry 6"]);
    assert_eq!(view["filter"], "all");
    assert_eq!(view["query"], "entry 6");
    assert_eq!(view["match_count"], 1);
}

#[test]
fn test_bad_sort_is_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_labsite"))
        .args(["--print", "--sort", "shuffle"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown sort mode"));
}
