//! File system abstractions: the [`entry::EntryDescriptor`] snapshot of one
//! entry, plus the [`filter`] and [`sort`] rules a scan applies.

pub mod entry;
pub mod filter;
pub mod sort;
