//! Listing extraction throughput on a synthetic page
//!
//! Each page holds `n` match rows plus a duplicate link per ten rows and some
//! navigation anchors, roughly the shape of the live listing.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::fmt::Write;
use std::hint::black_box;

use match_crawler::infrastructure::parsing::{
    ContextualParser, HtmlDom, MatchListParser, ParseContext,
};

fn listing_page(rows: usize) -> String {
    let mut html = String::from(r#"<html><body><nav><a href="/tin-tuc/">Tin tức</a></nav>"#);
    for i in 0..rows {
        let _ = write!(
            html,
            r#"<div class="xitem2"><a class="match-link" href="/truc-tiep/doi-{i}-vs-doi-{j}-{i}">xem</a>
               <span class="team-home"><span class="name">Đội {i}</span></span>
               <span class="team-away"><span class="name">Đội {j}</span></span>
               <span class="xtime"><b>{h:02}:00</b></span>
               <span class="xstatus">{status}</span></div>"#,
            j = i + 1,
            h = i % 24,
            status = if i % 3 == 0 { "Live" } else { "" },
        );
        if i % 10 == 0 {
            let _ = write!(html, r#"<a href="/truc-tiep/doi-{i}-vs-doi-{}-{i}">dup</a>"#, i + 1);
        }
    }
    html.push_str("</body></html>");
    html
}

fn extraction(c: &mut Criterion) {
    let parser = MatchListParser::new();
    let context = ParseContext::for_page("https://st.90phut27.com/home");
    let mut group = c.benchmark_group("match_list_extraction");

    for rows in [10, 100, 500] {
        let html = listing_page(rows);

        group.bench_with_input(BenchmarkId::new("parse_and_extract", rows), &html, |b, html| {
            b.iter(|| {
                let dom = HtmlDom::parse_document(html);
                black_box(parser.parse_with_context(&dom, &context))
            })
        });

        let dom = HtmlDom::parse_document(&html);
        group.bench_with_input(BenchmarkId::new("extract_only", rows), &dom, |b, dom| {
            b.iter(|| black_box(parser.parse_with_context(dom, &context)))
        });
    }

    group.finish();
}

criterion_group!(benches, extraction);
criterion_main!(benches);
