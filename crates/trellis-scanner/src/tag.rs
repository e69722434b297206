//! Tag markers: categories, bounded names, and the stack entry type.

use crate::TagOracle;

/// Maximum length, in bytes, of a custom tag name. Longer names are truncated
/// at this bound both in memory and in the persisted state.
pub const MAX_TAG_NAME_LEN: usize = 255;

macro_rules! tag_categories {
    ($($variant:ident),* $(,)?) => {
        /// Classification of an open tag context.
        ///
        /// One variant per built-in HTML element kind (void elements grouped
        /// first), plus `Custom` for author-defined elements (which carry a
        /// name) and `Interpolation` for an open `{{ … }}` region. The
        /// discriminant doubles as the category byte in the persisted state.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u8)]
        pub enum TagCategory {
            $($variant),*
        }

        impl TagCategory {
            const ALL: &'static [TagCategory] = &[$(TagCategory::$variant),*];
        }
    };
}

tag_categories! {
    // Void elements.
    Area, Base, Basefont, Bgsound, Br, Col, Command, Embed, Frame, Hr,
    Image, Img, Input, Isindex, Keygen, Link, Menuitem, Meta, Nextid,
    Param, Source, Track, Wbr,
    // Container elements.
    A, Abbr, Address, Article, Aside, Audio, B, Bdi, Bdo, Blockquote,
    Body, Button, Canvas, Caption, Cite, Code, Colgroup, Data, Datalist,
    Dd, Del, Details, Dfn, Dialog, Div, Dl, Dt, Em, Fieldset, Figcaption,
    Figure, Footer, Form, H1, H2, H3, H4, H5, H6, Head, Header, Hgroup,
    Html, I, Iframe, Ins, Kbd, Label, Legend, Li, Main, Map, Mark, Math,
    Menu, Meter, Nav, Noscript, Object, Ol, Optgroup, Option, Output, P,
    Picture, Pre, Progress, Q, Rb, Rp, Rt, Rtc, Ruby, S, Samp, Script,
    Section, Select, Slot, Small, Span, Strong, Style, Sub, Summary, Sup,
    Svg, Table, Tbody, Td, Template, Textarea, Tfoot, Th, Thead, Time,
    Title, Tr, U, Ul, Var, Video,
    // Anything else.
    Custom,
    // Open `{{ … }}` region.
    Interpolation,
}

impl TagCategory {
    /// The category byte used in the persisted state.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Inverse of [`TagCategory::as_u8`]. `None` for bytes that do not name a
    /// category.
    pub fn from_u8(value: u8) -> Option<TagCategory> {
        Self::ALL.get(value as usize).copied()
    }
}

/// A bounded, upper-cased tag name buffer.
///
/// Characters pushed past [`MAX_TAG_NAME_LEN`] bytes are dropped silently, so
/// a name always fits the one-byte length field of the persisted state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TagName(String);

impl TagName {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one character, upper-casing it. Characters that would push the
    /// buffer past the bound are dropped.
    pub fn push(&mut self, ch: char) {
        for up in ch.to_uppercase() {
            if self.0.len() + up.len_utf8() > MAX_TAG_NAME_LEN {
                return;
            }
            self.0.push(up);
        }
    }

    /// Build a name from a raw string, normalizing and bounding it.
    pub fn normalized(s: &str) -> Self {
        let mut name = Self::default();
        for ch in s.chars() {
            name.push(ch);
        }
        name
    }

    /// Rebuild a name from persisted bytes. The bytes were written by the
    /// codec and are already normalized; invalid UTF-8 is replaced rather
    /// than refused.
    pub(crate) fn from_raw_bytes(bytes: &[u8]) -> Self {
        Self(String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One open context on the tag stack.
///
/// Two markers are equal iff their categories are equal and, for `Custom`,
/// their names are equal as well; the name field is empty for every other
/// category, so derived equality implements exactly that rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub category: TagCategory,
    pub name: TagName,
}

impl Tag {
    /// A marker for a built-in element category.
    pub fn element(category: TagCategory) -> Self {
        Self {
            category,
            name: TagName::default(),
        }
    }

    /// A marker for an author-defined element.
    pub fn custom(name: TagName) -> Self {
        Self {
            category: TagCategory::Custom,
            name,
        }
    }

    /// The nameless marker for an open interpolation region.
    pub fn interpolation() -> Self {
        Self::element(TagCategory::Interpolation)
    }

    /// Classify a scanned name and build the matching marker. The name buffer
    /// is kept only for custom elements.
    pub fn for_name<O: TagOracle + ?Sized>(oracle: &O, name: TagName) -> Self {
        let category = oracle.classify(name.as_str());
        if category == TagCategory::Custom {
            Self::custom(name)
        } else {
            Self::element(category)
        }
    }
}

/// The marker used to pad a restored stack when the persisted form was
/// truncated: it carries no real category or name information.
impl Default for Tag {
    fn default() -> Self {
        Self::custom(TagName::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_byte_round_trip() {
        for &category in TagCategory::ALL {
            assert_eq!(TagCategory::from_u8(category.as_u8()), Some(category));
        }
        assert_eq!(TagCategory::from_u8(u8::MAX), None);
    }

    #[test]
    fn name_is_upper_cased() {
        let name = TagName::normalized("my-widget");
        assert_eq!(name.as_str(), "MY-WIDGET");
    }

    #[test]
    fn name_is_bounded() {
        let long = "x".repeat(MAX_TAG_NAME_LEN + 40);
        let name = TagName::normalized(&long);
        assert_eq!(name.as_str().len(), MAX_TAG_NAME_LEN);
    }

    #[test]
    fn custom_markers_compare_by_name() {
        let a = Tag::custom(TagName::normalized("a-widget"));
        let b = Tag::custom(TagName::normalized("b-widget"));
        assert_ne!(a, b);
        assert_eq!(a, Tag::custom(TagName::normalized("A-WIDGET")));
    }

    #[test]
    fn builtin_markers_compare_by_category() {
        assert_eq!(Tag::element(TagCategory::Div), Tag::element(TagCategory::Div));
        assert_ne!(Tag::element(TagCategory::Div), Tag::element(TagCategory::Span));
        assert_ne!(Tag::element(TagCategory::Div), Tag::interpolation());
    }
}
