//! Plain-text rendering of listings and controller events.

use std::fmt::Write as _;
use std::time::SystemTime;

use dirlive_core::{DirectorySnapshot, EntryDescriptor, EntryKind, Event};

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Renders one controller event, or `None` for events not worth a line.
///
/// `preselected` marks the entry that path resolution landed on.
pub fn render_event(event: &Event, preselected: Option<&str>) -> Option<String> {
    match event {
        Event::LoadingChanged(true) => Some("scanning...".to_owned()),
        Event::LoadingChanged(false) | Event::DataReady(_) => None,
        Event::Progress(count) => Some(format!("  {count} entries so far")),
        Event::DataApplied(snapshot) => Some(render_snapshot(snapshot, preselected)),
        Event::ScanFailed(reason) => Some(format!("scan failed: {reason}")),
    }
}

/// Renders a full listing with a header line.
pub fn render_snapshot(snapshot: &DirectorySnapshot, preselected: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({} entries)",
        snapshot.path().display(),
        snapshot.len()
    );
    for entry in snapshot.entries() {
        let marker = if preselected == Some(entry.name()) { '>' } else { ' ' };
        let _ = writeln!(out, "{marker} {}", render_entry(entry));
    }
    out.truncate(out.trim_end().len());
    out
}

fn render_entry(entry: &EntryDescriptor) -> String {
    let (tag, name) = match entry.kind() {
        EntryKind::Volume => ("vol", format!("{}/", entry.name())),
        EntryKind::Directory => ("dir", format!("{}/", entry.name())),
        EntryKind::File => ("   ", entry.name().to_owned()),
    };
    let size = match entry.kind() {
        EntryKind::File => format_size(entry.size()),
        _ => String::new(),
    };
    let modified = entry.modified().map(format_time_ago).unwrap_or_default();
    let link = if entry.is_symlink() { " ->" } else { "" };
    format!("{tag} {name:<40}{link} {size:>10} {modified:>8}")
}

fn format_time_ago(time: SystemTime) -> String {
    let elapsed = match SystemTime::now().duration_since(time) {
        Ok(d) => d,
        Err(_) => return "just now".to_owned(),
    };

    let secs = elapsed.as_secs();
    if secs < 60 {
        return format!("{secs}s ago");
    }
    let mins = secs / 60;
    if mins < 60 {
        return format!("{mins}m ago");
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours / 24)
}

fn format_size(bytes: u64) -> String {
    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn sample() -> (TempDir, DirectorySnapshot) {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("sub")).unwrap();
        std::fs::write(tmp.path().join("a.txt"), "hello").unwrap();

        let dir_path = tmp.path().join("sub");
        let dir_meta = std::fs::metadata(&dir_path).unwrap();
        let file_path = tmp.path().join("a.txt");
        let file_meta = std::fs::metadata(&file_path).unwrap();
        let entries = vec![
            EntryDescriptor::new(dir_path, &dir_meta, EntryKind::Directory),
            EntryDescriptor::new(file_path, &file_meta, EntryKind::File),
        ];
        let snapshot = DirectorySnapshot::new(tmp.path().to_path_buf(), entries);
        (tmp, snapshot)
    }

    #[test]
    fn format_size_units() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(MB), "1.0 MB");
        assert_eq!(format_size(GB), "1.0 GB");
    }

    #[test]
    fn format_time_ago_buckets() {
        let now = SystemTime::now();
        assert!(format_time_ago(now).ends_with("s ago"));
        assert_eq!(format_time_ago(now - Duration::from_secs(120)), "2m ago");
        assert_eq!(format_time_ago(now - Duration::from_secs(3 * 3600)), "3h ago");
        assert_eq!(format_time_ago(now - Duration::from_secs(2 * 86400)), "2d ago");
        assert_eq!(format_time_ago(now + Duration::from_secs(60)), "just now");
    }

    #[test]
    fn snapshot_lists_header_and_entries_in_order() {
        let (_tmp, snapshot) = sample();
        let text = render_snapshot(&snapshot, None);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("(2 entries)"));
        assert!(lines[1].contains("dir sub/"));
        assert!(lines[2].contains("a.txt"));
        assert!(lines[2].contains("5 B"));
    }

    #[test]
    fn preselected_entry_is_marked() {
        let (_tmp, snapshot) = sample();
        let text = render_snapshot(&snapshot, Some("a.txt"));
        let marked: Vec<&str> = text.lines().filter(|l| l.starts_with('>')).collect();

        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains("a.txt"));
    }

    #[test]
    fn quiet_events_render_nothing() {
        let snapshot = Arc::new(DirectorySnapshot::new(PathBuf::from("/x"), Vec::new()));
        assert!(render_event(&Event::LoadingChanged(false), None).is_none());
        assert!(render_event(&Event::DataReady(snapshot), None).is_none());
        assert_eq!(
            render_event(&Event::ScanFailed("boom".into()), None).as_deref(),
            Some("scan failed: boom")
        );
    }
}
