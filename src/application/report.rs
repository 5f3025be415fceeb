//! Human-readable crawl summaries

use std::fmt::Write;

use crate::domain::{MatchDetail, MatchList};

/// Total count plus the first `limit` matches
pub fn render_summary(list: &MatchList, limit: usize) -> String {
    let mut out = String::new();
    let stats = &list.stats;

    let _ = writeln!(out, "📊 Crawl result:");
    let _ = writeln!(out, "Total matches: {}", list.len());
    let live = list.records.iter().filter(|r| r.status.is_live()).count();
    let _ = writeln!(out, "Live now: {live}");
    let _ = writeln!(
        out,
        "Anchors: {} seen, {} skipped, {} duplicates",
        stats.anchors_seen, stats.skipped, stats.duplicates
    );

    if list.is_empty() {
        let _ = writeln!(out, "⚠️ No matches found");
        return out;
    }

    let shown = limit.min(list.len());
    let _ = writeln!(out, "\n📋 First {shown} matches:");
    for (i, record) in list.records.iter().take(limit).enumerate() {
        let _ = writeln!(out, "\n{}. {}", i + 1, record.full_text);
        let _ = writeln!(out, "   Time: {}", record.match_time);
        let _ = writeln!(out, "   Status: {}", record.status);
        let _ = writeln!(out, "   URL: {}", record.url);
        let _ = writeln!(out, "   Match ID: {}", record.match_id);
    }
    out
}

pub fn render_detail(detail: &MatchDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🎬 {}", detail.url);
    if detail.stream_urls.is_empty() {
        let _ = writeln!(out, "⚠️ No stream URLs found");
    }
    for (i, stream) in detail.stream_urls.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, stream);
    }
    out
}
