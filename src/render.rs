use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

use crate::models::Entry;
use crate::timestamp::Timestamp;

pub fn format_entry(entry: &Entry, now: DateTime<Utc>) -> String {
    let end = entry
        .end
        .as_ref()
        .map(format_local)
        .unwrap_or_else(|| "active".to_string());
    format!(
        "• #{} {} ({} → {}, {:.2}h)",
        entry.id,
        display_name(&entry.name),
        format_local(&entry.start),
        end,
        hours(entry.elapsed(now))
    )
}

pub fn format_entries(entries: &[Entry], now: DateTime<Utc>) -> String {
    entries
        .iter()
        .map(|entry| format_entry(entry, now))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_keyed_entries(entries: &BTreeMap<String, Vec<Entry>>, now: DateTime<Utc>) -> String {
    entries
        .iter()
        .flat_map(|(key, group)| {
            group
                .iter()
                .map(move |entry| format!("{key}: {}", format_entry(entry, now)))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn display_name(name: &str) -> &str {
    if name.trim().is_empty() { "(unnamed)" } else { name }
}

fn format_local(ts: &Timestamp) -> String {
    ts.to_local().format("%Y-%m-%d %H:%M").to_string()
}

fn hours(duration: Duration) -> f64 {
    duration.num_seconds() as f64 / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(value: &str) -> Timestamp {
        Timestamp::parse(value).unwrap()
    }

    #[test]
    fn active_entry_shows_running_hours() {
        let entry = Entry {
            id: 4,
            name: "Planning".to_string(),
            start: ts("2026-02-03T08:00:00Z"),
            ..Entry::default()
        };
        let line = format_entry(&entry, ts("2026-02-03T09:30:00Z").to_utc());
        assert!(line.starts_with("• #4 Planning ("));
        assert!(line.contains("→ active, 1.50h)"));
    }

    #[test]
    fn blank_names_are_marked() {
        let entry = Entry {
            start: ts("2026-02-03T08:00:00Z"),
            end: Some(ts("2026-02-03T08:15:00Z")),
            ..Entry::default()
        };
        let line = format_entry(&entry, Utc::now());
        assert!(line.contains("(unnamed)"));
        assert!(line.ends_with(", 0.25h)"));
    }

    #[test]
    fn keyed_lines_are_prefixed() {
        let entry = |id| Entry {
            id,
            ..Entry::default()
        };
        let mut entries = BTreeMap::new();
        entries.insert("b".to_string(), vec![entry(2), entry(3)]);
        entries.insert("a".to_string(), vec![entry(1)]);
        entries.insert("c".to_string(), Vec::new());
        let text = format_keyed_entries(&entries, Utc::now());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("a: • #1"));
        assert!(lines[1].starts_with("b: • #2"));
        assert!(lines[2].starts_with("b: • #3"));
    }
}
