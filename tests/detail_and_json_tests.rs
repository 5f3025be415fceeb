//! Detail stream collection and JSON output
use match_crawler::infrastructure::json_store;
use match_crawler::infrastructure::parsing::{
    ContextualParser, DetailParseContext, HtmlDom, MatchDetailParser,
};
use match_crawler::{CrawlerConfig, MatchCrawler, MatchDetail, MatchRecord, MatchStatus};

const MATCH_URL: &str = "https://st.90phut27.com/truc-tiep/a-vs-b-1";

fn collect(html: &str) -> MatchDetail {
    let dom = HtmlDom::parse_document(html);
    MatchDetailParser::new()
        .parse_with_context(&dom, &DetailParseContext::new(MATCH_URL.to_string()))
        .unwrap()
}

#[test]
fn frame_then_video_sources_skipping_empty() {
    let detail = collect(
        r#"<video><source src="b"><source src=""></video>
           <iframe src="a"></iframe>"#,
    );
    assert_eq!(detail.stream_urls, vec!["a", "b"]);
    assert_eq!(detail.url, MATCH_URL);
}

#[test]
fn duplicate_sources_are_kept() {
    let detail = collect(
        r#"<iframe src="https://p/1"></iframe><iframe></iframe>
           <iframe src="https://p/1"></iframe>
           <video><source src="https://v/1.m3u8"></video>
           <video><source src="https://v/1.m3u8"></video>"#,
    );
    assert_eq!(
        detail.stream_urls,
        vec!["https://p/1", "https://p/1", "https://v/1.m3u8", "https://v/1.m3u8"]
    );
}

#[test]
fn page_without_players_has_no_streams() {
    assert!(collect("<p>Trận đấu chưa bắt đầu</p>").stream_urls.is_empty());
}

fn sample_records() -> Vec<MatchRecord> {
    let crawler = MatchCrawler::new(CrawlerConfig::default()).unwrap();
    let html = r#"
        <div class="xitem2"><a class="match-link" href="/truc-tiep/sgn-vs-hagl-77">x</a>
          <span class="team-home"><span class="name">Sài Gòn</span></span>
          <span class="team-away"><span class="name">Hoàng Anh Gia Lai</span></span>
          <span class="xtime"><b>18:00</b></span>
          <span class="xstatus">Live</span></div>
        <div class="xitem2"><a class="match-link" href="/truc-tiep/psg-vs-om-78">x</a>
          <span class="team-home"><span class="name">PSG</span></span></div>
    "#;
    crawler
        .parse_list_snapshot(html, crawler.list_url())
        .unwrap()
        .records
}

#[tokio::test]
async fn json_round_trip_preserves_every_field() {
    let records = sample_records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].status, MatchStatus::Live);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("matches.json");
    json_store::save_matches(&path, &records).await.unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("Hoàng Anh Gia Lai"));
    assert!(raw.contains("\"full_text\": \"PSG vs \""));
    assert!(!raw.contains("\\u"));

    let loaded = json_store::load_matches(&path).await.unwrap();
    assert_eq!(loaded, records);
}

#[test]
fn json_objects_have_exactly_the_record_keys() {
    let json = json_store::matches_to_json(&sample_records()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    for object in value.as_array().unwrap() {
        let mut keys: Vec<&str> = object.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                "away_team", "crawled_at", "full_text", "home_team", "match_id", "match_time",
                "source", "status", "stream_id", "url",
            ]
        );
    }
}

#[tokio::test]
async fn detail_json_round_trip() {
    let detail = collect(r#"<iframe src="https://player/x"></iframe>"#);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("detail.json");

    json_store::save_detail(&path, &detail).await.unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    let loaded: MatchDetail = serde_json::from_str(&raw).unwrap();
    assert_eq!(loaded, detail);
}

#[tokio::test]
async fn snapshot_reparse_matches_live_parse() {
    let crawler = MatchCrawler::new(CrawlerConfig::default()).unwrap();
    let html = r#"<div class="xitem2"><a href="/truc-tiep/x-vs-y-3">x</a></div>"#;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snap").join("home.html");
    json_store::save_snapshot(&path, html).await.unwrap();
    let restored = json_store::load_snapshot(&path).await.unwrap();

    let list = crawler.parse_list_snapshot(&restored, crawler.list_url()).unwrap();
    assert_eq!(list.records[0].url, "https://st.90phut27.com/truc-tiep/x-vs-y-3");
}
