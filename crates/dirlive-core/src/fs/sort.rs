//! Sort policy for scanned entries.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::fs::entry::{EntryDescriptor, EntryKind};

/// The field by which entries are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// Sort alphabetically by name (case-insensitive).
    #[default]
    Name,
    /// Sort by file size in bytes.
    Size,
    /// Sort by last-modified time.
    Date,
    /// Sort by file extension (case-insensitive).
    Type,
}

/// Sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest / earliest / A–Z first.
    #[default]
    Ascending,
    /// Largest / latest / Z–A first.
    Descending,
}

impl SortDirection {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        }
    }
}

/// How a snapshot orders its entries.
///
/// Volumes always come first. Unless `mix_folders_and_files` is set,
/// directories precede files regardless of the sort field and direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortPolicy {
    pub field: SortField,
    pub direction: SortDirection,
    pub mix_folders_and_files: bool,
}

impl SortPolicy {
    pub fn new(field: SortField, direction: SortDirection, mix_folders_and_files: bool) -> Self {
        Self {
            field,
            direction,
            mix_folders_and_files,
        }
    }

    /// Sorts `entries` in place into display order.
    pub fn sort(&self, entries: &mut [EntryDescriptor]) {
        entries.sort_by(|a, b| self.compare(a, b));
    }

    /// Total display ordering between two entries.
    pub fn compare(&self, a: &EntryDescriptor, b: &EntryDescriptor) -> Ordering {
        let rank_cmp = self.rank(a.kind()).cmp(&self.rank(b.kind()));
        if rank_cmp != Ordering::Equal {
            return rank_cmp;
        }

        let ord = compare_by_field(a, b, self.field).then_with(|| compare_names(a, b));
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }

    fn rank(&self, kind: EntryKind) -> u8 {
        match kind {
            EntryKind::Volume => 0,
            EntryKind::Directory => 1,
            EntryKind::File if self.mix_folders_and_files => 1,
            EntryKind::File => 2,
        }
    }
}

fn compare_by_field(a: &EntryDescriptor, b: &EntryDescriptor, field: SortField) -> Ordering {
    match field {
        SortField::Name => compare_names(a, b),
        SortField::Size => a.size().cmp(&b.size()),
        SortField::Date => a.modified().cmp(&b.modified()),
        SortField::Type => a.extension_lower().cmp(&b.extension_lower()),
    }
}

fn compare_names(a: &EntryDescriptor, b: &EntryDescriptor) -> Ordering {
    a.name().to_lowercase().cmp(&b.name().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn describe(path: &Path, kind: EntryKind) -> EntryDescriptor {
        let metadata = fs::metadata(path).unwrap();
        EntryDescriptor::new(path.to_path_buf(), &metadata, kind)
    }

    fn create_test_entries(tmp: &TempDir) -> Vec<EntryDescriptor> {
        fs::write(tmp.path().join("banana.txt"), "12345").unwrap();
        fs::write(tmp.path().join("apple.rs"), "ab").unwrap();
        fs::write(tmp.path().join("cherry.md"), "abcdefghij").unwrap();
        fs::create_dir(tmp.path().join("docs")).unwrap();
        fs::create_dir(tmp.path().join("src")).unwrap();

        ["banana.txt", "apple.rs", "cherry.md", "docs", "src"]
            .iter()
            .map(|name| {
                let path = tmp.path().join(name);
                let kind = if path.is_dir() {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                };
                describe(&path, kind)
            })
            .collect()
    }

    fn names(entries: &[EntryDescriptor]) -> Vec<&str> {
        entries.iter().map(|e| e.name()).collect()
    }

    #[test]
    fn name_sort_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        let mut entries: Vec<_> = ["b.txt", "A.txt", "c.txt"]
            .iter()
            .map(|name| {
                let path = tmp.path().join(name);
                fs::write(&path, "").unwrap();
                describe(&path, EntryKind::File)
            })
            .collect();

        SortPolicy::default().sort(&mut entries);

        assert_eq!(names(&entries), vec!["A.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn dirs_first_by_default() {
        let tmp = TempDir::new().unwrap();
        let mut entries = create_test_entries(&tmp);

        SortPolicy::default().sort(&mut entries);

        assert_eq!(
            names(&entries),
            vec!["docs", "src", "apple.rs", "banana.txt", "cherry.md"]
        );
    }

    #[test]
    fn dirs_first_survives_descending() {
        let tmp = TempDir::new().unwrap();
        let mut entries = create_test_entries(&tmp);

        SortPolicy::new(SortField::Name, SortDirection::Descending, false).sort(&mut entries);

        assert_eq!(
            names(&entries),
            vec!["src", "docs", "cherry.md", "banana.txt", "apple.rs"]
        );
    }

    #[test]
    fn mixed_sorts_dirs_with_files() {
        let tmp = TempDir::new().unwrap();
        let mut entries = create_test_entries(&tmp);

        SortPolicy::new(SortField::Name, SortDirection::Ascending, true).sort(&mut entries);

        assert_eq!(
            names(&entries),
            vec!["apple.rs", "banana.txt", "cherry.md", "docs", "src"]
        );
    }

    #[test]
    fn size_sort_orders_files() {
        let tmp = TempDir::new().unwrap();
        let mut entries = create_test_entries(&tmp);

        SortPolicy::new(SortField::Size, SortDirection::Descending, false).sort(&mut entries);

        let files: Vec<_> = entries.iter().filter(|e| !e.is_dir()).collect();
        assert_eq!(files[0].name(), "cherry.md");
        assert_eq!(files[1].name(), "banana.txt");
        assert_eq!(files[2].name(), "apple.rs");
    }

    #[test]
    fn type_sort_orders_by_extension() {
        let tmp = TempDir::new().unwrap();
        let mut entries = create_test_entries(&tmp);

        SortPolicy::new(SortField::Type, SortDirection::Ascending, false).sort(&mut entries);

        let files: Vec<_> = entries.iter().filter(|e| !e.is_dir()).map(|e| e.name()).collect();
        assert_eq!(files, vec!["cherry.md", "apple.rs", "banana.txt"]);
    }

    #[test]
    fn volumes_precede_everything() {
        let tmp = TempDir::new().unwrap();
        let mut entries = create_test_entries(&tmp);
        let sdcard = tmp.path().join("zz-sdcard");
        fs::create_dir(&sdcard).unwrap();
        entries.push(describe(&sdcard, EntryKind::Volume));

        SortPolicy::new(SortField::Name, SortDirection::Ascending, true).sort(&mut entries);

        assert_eq!(entries[0].name(), "zz-sdcard");
    }

    #[test]
    fn sort_field_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            sort_by: SortField,
        }
        let parsed: Wrapper = toml::from_str("sort_by = \"date\"").unwrap();
        assert_eq!(parsed.sort_by, SortField::Date);
    }

    #[test]
    fn direction_from_ascending_flag() {
        assert_eq!(SortDirection::from_ascending(true), SortDirection::Ascending);
        assert_eq!(SortDirection::from_ascending(false), SortDirection::Descending);
    }
}
