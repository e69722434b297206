//! Reference HTML5 tag oracle.

use trellis_scanner::{TagCategory, TagOracle};

/// Elements that never have closing syntax.
const VOID_CATEGORIES: &[TagCategory] = &[
    TagCategory::Area,
    TagCategory::Base,
    TagCategory::Basefont,
    TagCategory::Bgsound,
    TagCategory::Br,
    TagCategory::Col,
    TagCategory::Command,
    TagCategory::Embed,
    TagCategory::Frame,
    TagCategory::Hr,
    TagCategory::Image,
    TagCategory::Img,
    TagCategory::Input,
    TagCategory::Isindex,
    TagCategory::Keygen,
    TagCategory::Link,
    TagCategory::Menuitem,
    TagCategory::Meta,
    TagCategory::Nextid,
    TagCategory::Param,
    TagCategory::Source,
    TagCategory::Track,
    TagCategory::Wbr,
];

/// Elements whose start tag closes an open paragraph.
const P_CLOSING_CATEGORIES: &[TagCategory] = &[
    TagCategory::Address,
    TagCategory::Article,
    TagCategory::Aside,
    TagCategory::Blockquote,
    TagCategory::Details,
    TagCategory::Div,
    TagCategory::Dl,
    TagCategory::Fieldset,
    TagCategory::Figcaption,
    TagCategory::Figure,
    TagCategory::Footer,
    TagCategory::Form,
    TagCategory::H1,
    TagCategory::H2,
    TagCategory::H3,
    TagCategory::H4,
    TagCategory::H5,
    TagCategory::H6,
    TagCategory::Header,
    TagCategory::Hr,
    TagCategory::Main,
    TagCategory::Nav,
    TagCategory::Ol,
    TagCategory::P,
    TagCategory::Pre,
    TagCategory::Section,
    TagCategory::Table,
    TagCategory::Ul,
];

/// HTML5 classification, void, and containment rules.
///
/// Names arrive already upper-cased from the scanner's normalization.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlOracle;

impl HtmlOracle {
    pub fn new() -> Self {
        Self
    }
}

impl TagOracle for HtmlOracle {
    fn classify(&self, name: &str) -> TagCategory {
        match name {
            "AREA" => TagCategory::Area,
            "BASE" => TagCategory::Base,
            "BASEFONT" => TagCategory::Basefont,
            "BGSOUND" => TagCategory::Bgsound,
            "BR" => TagCategory::Br,
            "COL" => TagCategory::Col,
            "COMMAND" => TagCategory::Command,
            "EMBED" => TagCategory::Embed,
            "FRAME" => TagCategory::Frame,
            "HR" => TagCategory::Hr,
            "IMAGE" => TagCategory::Image,
            "IMG" => TagCategory::Img,
            "INPUT" => TagCategory::Input,
            "ISINDEX" => TagCategory::Isindex,
            "KEYGEN" => TagCategory::Keygen,
            "LINK" => TagCategory::Link,
            "MENUITEM" => TagCategory::Menuitem,
            "META" => TagCategory::Meta,
            "NEXTID" => TagCategory::Nextid,
            "PARAM" => TagCategory::Param,
            "SOURCE" => TagCategory::Source,
            "TRACK" => TagCategory::Track,
            "WBR" => TagCategory::Wbr,
            "A" => TagCategory::A,
            "ABBR" => TagCategory::Abbr,
            "ADDRESS" => TagCategory::Address,
            "ARTICLE" => TagCategory::Article,
            "ASIDE" => TagCategory::Aside,
            "AUDIO" => TagCategory::Audio,
            "B" => TagCategory::B,
            "BDI" => TagCategory::Bdi,
            "BDO" => TagCategory::Bdo,
            "BLOCKQUOTE" => TagCategory::Blockquote,
            "BODY" => TagCategory::Body,
            "BUTTON" => TagCategory::Button,
            "CANVAS" => TagCategory::Canvas,
            "CAPTION" => TagCategory::Caption,
            "CITE" => TagCategory::Cite,
            "CODE" => TagCategory::Code,
            "COLGROUP" => TagCategory::Colgroup,
            "DATA" => TagCategory::Data,
            "DATALIST" => TagCategory::Datalist,
            "DD" => TagCategory::Dd,
            "DEL" => TagCategory::Del,
            "DETAILS" => TagCategory::Details,
            "DFN" => TagCategory::Dfn,
            "DIALOG" => TagCategory::Dialog,
            "DIV" => TagCategory::Div,
            "DL" => TagCategory::Dl,
            "DT" => TagCategory::Dt,
            "EM" => TagCategory::Em,
            "FIELDSET" => TagCategory::Fieldset,
            "FIGCAPTION" => TagCategory::Figcaption,
            "FIGURE" => TagCategory::Figure,
            "FOOTER" => TagCategory::Footer,
            "FORM" => TagCategory::Form,
            "H1" => TagCategory::H1,
            "H2" => TagCategory::H2,
            "H3" => TagCategory::H3,
            "H4" => TagCategory::H4,
            "H5" => TagCategory::H5,
            "H6" => TagCategory::H6,
            "HEAD" => TagCategory::Head,
            "HEADER" => TagCategory::Header,
            "HGROUP" => TagCategory::Hgroup,
            "HTML" => TagCategory::Html,
            "I" => TagCategory::I,
            "IFRAME" => TagCategory::Iframe,
            "INS" => TagCategory::Ins,
            "KBD" => TagCategory::Kbd,
            "LABEL" => TagCategory::Label,
            "LEGEND" => TagCategory::Legend,
            "LI" => TagCategory::Li,
            "MAIN" => TagCategory::Main,
            "MAP" => TagCategory::Map,
            "MARK" => TagCategory::Mark,
            "MATH" => TagCategory::Math,
            "MENU" => TagCategory::Menu,
            "METER" => TagCategory::Meter,
            "NAV" => TagCategory::Nav,
            "NOSCRIPT" => TagCategory::Noscript,
            "OBJECT" => TagCategory::Object,
            "OL" => TagCategory::Ol,
            "OPTGROUP" => TagCategory::Optgroup,
            "OPTION" => TagCategory::Option,
            "OUTPUT" => TagCategory::Output,
            "P" => TagCategory::P,
            "PICTURE" => TagCategory::Picture,
            "PRE" => TagCategory::Pre,
            "PROGRESS" => TagCategory::Progress,
            "Q" => TagCategory::Q,
            "RB" => TagCategory::Rb,
            "RP" => TagCategory::Rp,
            "RT" => TagCategory::Rt,
            "RTC" => TagCategory::Rtc,
            "RUBY" => TagCategory::Ruby,
            "S" => TagCategory::S,
            "SAMP" => TagCategory::Samp,
            "SCRIPT" => TagCategory::Script,
            "SECTION" => TagCategory::Section,
            "SELECT" => TagCategory::Select,
            "SLOT" => TagCategory::Slot,
            "SMALL" => TagCategory::Small,
            "SPAN" => TagCategory::Span,
            "STRONG" => TagCategory::Strong,
            "STYLE" => TagCategory::Style,
            "SUB" => TagCategory::Sub,
            "SUMMARY" => TagCategory::Summary,
            "SUP" => TagCategory::Sup,
            "SVG" => TagCategory::Svg,
            "TABLE" => TagCategory::Table,
            "TBODY" => TagCategory::Tbody,
            "TD" => TagCategory::Td,
            "TEMPLATE" => TagCategory::Template,
            "TEXTAREA" => TagCategory::Textarea,
            "TFOOT" => TagCategory::Tfoot,
            "TH" => TagCategory::Th,
            "THEAD" => TagCategory::Thead,
            "TIME" => TagCategory::Time,
            "TITLE" => TagCategory::Title,
            "TR" => TagCategory::Tr,
            "U" => TagCategory::U,
            "UL" => TagCategory::Ul,
            "VAR" => TagCategory::Var,
            "VIDEO" => TagCategory::Video,
            _ => TagCategory::Custom,
        }
    }

    fn is_void(&self, category: TagCategory) -> bool {
        VOID_CATEGORIES.contains(&category)
    }

    fn can_contain(&self, parent: TagCategory, child: TagCategory) -> bool {
        match parent {
            TagCategory::Li => child != TagCategory::Li,
            TagCategory::Dt | TagCategory::Dd => {
                child != TagCategory::Dt && child != TagCategory::Dd
            }
            TagCategory::P => !P_CLOSING_CATEGORIES.contains(&child),
            TagCategory::Colgroup => child == TagCategory::Col,
            TagCategory::Rb | TagCategory::Rt | TagCategory::Rp => !matches!(
                child,
                TagCategory::Rb | TagCategory::Rt | TagCategory::Rp
            ),
            TagCategory::Optgroup => child != TagCategory::Optgroup,
            TagCategory::Tr => matches!(
                child,
                TagCategory::Td | TagCategory::Th | TagCategory::Script | TagCategory::Template
            ),
            TagCategory::Td | TagCategory::Th => !matches!(
                child,
                TagCategory::Td | TagCategory::Th | TagCategory::Tr
            ),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_builtin_and_custom_names() {
        let oracle = HtmlOracle::new();
        assert_eq!(oracle.classify("DIV"), TagCategory::Div);
        assert_eq!(oracle.classify("SCRIPT"), TagCategory::Script);
        assert_eq!(oracle.classify("APP-ROOT"), TagCategory::Custom);
        assert_eq!(oracle.classify(""), TagCategory::Custom);
    }

    #[test]
    fn void_elements() {
        let oracle = HtmlOracle::new();
        assert!(oracle.is_void(TagCategory::Img));
        assert!(oracle.is_void(TagCategory::Br));
        assert!(!oracle.is_void(TagCategory::Div));
        assert!(!oracle.is_void(TagCategory::Custom));
    }

    #[test]
    fn paragraph_cannot_contain_block_elements() {
        let oracle = HtmlOracle::new();
        assert!(!oracle.can_contain(TagCategory::P, TagCategory::Div));
        assert!(oracle.can_contain(TagCategory::P, TagCategory::Span));
        assert!(oracle.can_contain(TagCategory::Div, TagCategory::P));
    }

    #[test]
    fn list_items_do_not_nest() {
        let oracle = HtmlOracle::new();
        assert!(!oracle.can_contain(TagCategory::Li, TagCategory::Li));
        assert!(oracle.can_contain(TagCategory::Ul, TagCategory::Li));
    }
}
