//! Per-category presentation: a glyph and an accent colour.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    /// Short machine-readable key
    pub key: &'static str,
    pub glyph: &'static str,
    pub color: Color,
}

const CODE: CategoryStyle = CategoryStyle {
    key: "code",
    glyph: "</>",
    color: Color::Cyan,
};

const STYLES: &[(&str, CategoryStyle)] = &[
    ("Code Generation", CODE),
    (
        "Content & Writing",
        CategoryStyle {
            key: "content",
            glyph: "✎",
            color: Color::Magenta,
        },
    ),
    (
        "Data & Analysis",
        CategoryStyle {
            key: "data",
            glyph: "▤",
            color: Color::Blue,
        },
    ),
    (
        "AI & Prompts",
        CategoryStyle {
            key: "ai",
            glyph: "◆",
            color: Color::Green,
        },
    ),
    (
        "DevOps",
        CategoryStyle {
            key: "devops",
            glyph: "⚙",
            color: Color::Yellow,
        },
    ),
    (
        "Product & Business",
        CategoryStyle {
            key: "product",
            glyph: "▣",
            color: Color::LightRed,
        },
    ),
];

/// Style for a category label; unknown labels get the code style.
pub fn category_style(category: &str) -> CategoryStyle {
    STYLES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, style)| *style)
        .unwrap_or(CODE)
}
