//! Persistence of session state across incremental parses.
//!
//! Layout, little-endian: a `u16` count of markers actually written, a `u16`
//! logical stack depth (capped at 65,535), then one entry per written marker
//! — a category byte, followed for custom elements by a length byte and that
//! many name bytes — and finally, when a byte of capacity remains, the
//! pending-`@` flag.
//!
//! Markers that do not fit the caller's buffer are dropped from the written
//! form but still counted in the logical depth; restoring pads the stack back
//! to full depth with default markers. A truncated or short buffer therefore
//! never fails to restore — it degrades to markers that carry no information.

use tracing::debug;

use crate::keyword::PendingAt;
use crate::scanner::Scanner;
use crate::tag::{Tag, TagCategory, TagName};
use crate::{ScanError, ScanResult};

/// Bytes taken by the two leading counts.
pub const HEADER_LEN: usize = 4;

/// Most markers a persisted session can describe.
pub const MAX_PERSISTED_DEPTH: usize = u16::MAX as usize;

impl Scanner {
    /// Write the session state into `buffer`, returning the number of bytes
    /// used. Fails only when the buffer cannot even hold the header.
    pub fn serialize(&self, buffer: &mut [u8]) -> ScanResult<usize> {
        if buffer.len() < HEADER_LEN {
            return Err(ScanError::BufferTooSmall {
                capacity: buffer.len(),
                needed: HEADER_LEN,
            });
        }

        let logical = self.tags.len().min(MAX_PERSISTED_DEPTH) as u16;
        buffer[2..4].copy_from_slice(&logical.to_le_bytes());

        let mut size = HEADER_LEN;
        let mut written: u16 = 0;
        for tag in self.tags.iter().take(logical as usize) {
            if tag.category == TagCategory::Custom {
                let name = tag.name.as_str().as_bytes();
                if size + 2 + name.len() >= buffer.len() {
                    break;
                }
                buffer[size] = tag.category.as_u8();
                buffer[size + 1] = name.len() as u8;
                buffer[size + 2..size + 2 + name.len()].copy_from_slice(name);
                size += 2 + name.len();
            } else {
                if size + 1 >= buffer.len() {
                    break;
                }
                buffer[size] = tag.category.as_u8();
                size += 1;
            }
            written += 1;
        }

        if written < logical {
            debug!(
                written,
                logical,
                capacity = buffer.len(),
                "serialized state truncated"
            );
        }
        buffer[..2].copy_from_slice(&written.to_le_bytes());

        if size < buffer.len() {
            buffer[size] = u8::from(self.pending_at == PendingAt::EmitPlainAt);
            size += 1;
        }

        Ok(size)
    }

    /// Replace the session state with the one persisted in `buffer`.
    ///
    /// An empty buffer restores an empty session. The restored stack depth
    /// always equals the persisted logical depth: entries missing from a
    /// truncated buffer come back as default markers. Never fails.
    pub fn deserialize(&mut self, buffer: &[u8]) {
        self.tags.clear();
        self.pending_at = PendingAt::None;

        if buffer.len() < HEADER_LEN {
            return;
        }

        let written = u16::from_le_bytes([buffer[0], buffer[1]]) as usize;
        let logical = u16::from_le_bytes([buffer[2], buffer[3]]) as usize;
        self.tags.reserve(logical);

        let mut pos = HEADER_LEN;
        for _ in 0..written {
            let Some(&category_byte) = buffer.get(pos) else {
                break;
            };
            pos += 1;

            let tag = match TagCategory::from_u8(category_byte) {
                Some(TagCategory::Custom) => {
                    let name_len = buffer.get(pos).copied().unwrap_or(0) as usize;
                    pos += 1;
                    let end = (pos + name_len).min(buffer.len());
                    let name = TagName::from_raw_bytes(&buffer[pos.min(end)..end]);
                    pos = end;
                    Tag::custom(name)
                }
                Some(category) => Tag::element(category),
                None => Tag::default(),
            };
            self.tags.push(tag);
        }

        // Entries the buffer had no room for come back as markers that carry
        // no real category or name information.
        while self.tags.len() < logical {
            self.tags.push(Tag::default());
        }

        if let Some(&flag) = buffer.get(pos) {
            if flag != 0 {
                self.pending_at = PendingAt::EmitPlainAt;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner_with(tags: Vec<Tag>) -> Scanner {
        let mut scanner = Scanner::new();
        scanner.tags = tags;
        scanner
    }

    #[test]
    fn round_trip_preserves_categories_and_names() {
        let scanner = scanner_with(vec![
            Tag::element(TagCategory::Div),
            Tag::custom(TagName::normalized("my-widget")),
            Tag::element(TagCategory::Script),
            Tag::interpolation(),
        ]);

        let mut buffer = [0u8; 128];
        let size = scanner.serialize(&mut buffer).unwrap();

        let mut restored = Scanner::new();
        restored.deserialize(&buffer[..size]);
        assert_eq!(restored.tags(), scanner.tags());
        assert_eq!(restored.pending_at(), PendingAt::None);
    }

    #[test]
    fn pending_flag_round_trips() {
        let mut scanner = Scanner::new();
        scanner.pending_at = PendingAt::EmitPlainAt;

        let mut buffer = [0u8; 16];
        let size = scanner.serialize(&mut buffer).unwrap();

        let mut restored = Scanner::new();
        restored.deserialize(&buffer[..size]);
        assert_eq!(restored.pending_at(), PendingAt::EmitPlainAt);
    }

    #[test]
    fn empty_buffer_restores_empty_session() {
        let mut restored = scanner_with(vec![Tag::element(TagCategory::P)]);
        restored.pending_at = PendingAt::EmitPlainAt;
        restored.deserialize(&[]);
        assert!(restored.tags().is_empty());
        assert_eq!(restored.pending_at(), PendingAt::None);
    }

    #[test]
    fn truncated_serialization_pads_with_default_markers() {
        let scanner = scanner_with(vec![Tag::element(TagCategory::Div); 10]);

        // Room for the header, three one-byte markers, and the flag byte.
        let mut buffer = [0u8; 8];
        let size = scanner.serialize(&mut buffer).unwrap();
        assert_eq!(size, 8);

        let mut restored = Scanner::new();
        restored.deserialize(&buffer[..size]);
        assert_eq!(restored.depth(), 10);
        assert_eq!(&restored.tags()[..3], &scanner.tags()[..3]);
        for tag in &restored.tags()[3..] {
            assert_eq!(tag, &Tag::default());
        }
    }

    #[test]
    fn oversized_custom_entry_is_dropped_not_split() {
        let scanner = scanner_with(vec![
            Tag::element(TagCategory::Ul),
            Tag::custom(TagName::normalized("app-dashboard-panel")),
        ]);

        // The custom entry (2 + 19 bytes) cannot fit after the header and the
        // first marker.
        let mut buffer = [0u8; 10];
        scanner.serialize(&mut buffer).unwrap();

        let mut restored = Scanner::new();
        restored.deserialize(&buffer);
        assert_eq!(restored.depth(), 2);
        assert_eq!(restored.tags()[0], Tag::element(TagCategory::Ul));
        assert_eq!(restored.tags()[1], Tag::default());
    }

    #[test]
    fn depth_beyond_u16_is_capped() {
        let scanner = scanner_with(vec![Tag::element(TagCategory::Li); MAX_PERSISTED_DEPTH + 7]);

        let mut buffer = vec![0u8; 8];
        scanner.serialize(&mut buffer).unwrap();
        assert_eq!(
            u16::from_le_bytes([buffer[2], buffer[3]]) as usize,
            MAX_PERSISTED_DEPTH
        );
    }

    #[test]
    fn unknown_category_byte_restores_default_marker() {
        let mut buffer = vec![1u8, 0, 1, 0, u8::MAX];
        let mut restored = Scanner::new();
        restored.deserialize(&buffer);
        assert_eq!(restored.tags(), &[Tag::default()]);

        // The same buffer with a valid byte restores the real marker.
        buffer[4] = TagCategory::Table.as_u8();
        restored.deserialize(&buffer);
        assert_eq!(restored.tags(), &[Tag::element(TagCategory::Table)]);
    }

    #[test]
    fn header_needs_four_bytes() {
        let scanner = Scanner::new();
        let mut buffer = [0u8; 3];
        assert!(matches!(
            scanner.serialize(&mut buffer),
            Err(ScanError::BufferTooSmall { capacity: 3, needed: 4 })
        ));
    }
}
