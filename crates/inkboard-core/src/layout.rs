//! Auto-layout: turn a titled bullet list into a frame of cards.
//!
//! The text is expected to look like assistant or pasted output:
//!
//! ```text
//! **Launch Plan**
//! - Research
//! - Build
//! 3. Ship
//! ```
//!
//! The first bold span becomes the frame title and every bullet or numbered
//! line becomes a card. Cards are packed into a near-square grid inside the
//! frame, and the frame is placed on free space near the requested center.

use crate::placement::{PlacementConfig, Placer};
use crate::shapes::{Shape, ShapeId};
use crate::style::SerializableColor;
use kurbo::{Point, Size};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(.+?)\*\*").expect("title pattern is valid")
});

static ITEM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*]\s+|\d+[.)]\s*|\d+\s+)(.*)$").expect("item pattern is valid")
});

/// Auto-layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub card_width: f64,
    pub card_height: f64,
    /// Space between neighbouring cards.
    pub gap: f64,
    /// Space between the frame border and the card grid.
    pub padding: f64,
    /// Height of the title band at the top of the frame.
    pub title_height: f64,
    /// Title used when the text has no bold span.
    pub default_title: String,
    pub card_fill: SerializableColor,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            card_width: 220.0,
            card_height: 140.0,
            gap: 24.0,
            padding: 40.0,
            title_height: 60.0,
            default_title: "Generated Layout".to_string(),
            card_fill: SerializableColor::card(),
        }
    }
}

/// Title and list items extracted from layout text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedList {
    pub title: Option<String>,
    pub items: Vec<String>,
}

/// Pull the first bold span and every bullet/numbered item out of `text`.
pub fn parse_list(text: &str) -> ParsedList {
    let title = TITLE_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty());

    let items = text
        .lines()
        .filter_map(|line| ITEM_PATTERN.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().replace("**", "").trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();

    ParsedList { title, items }
}

/// Near-square grid for `count` items: `(columns, rows)`.
pub fn grid_dimensions(count: usize) -> (usize, usize) {
    if count == 0 {
        return (0, 0);
    }
    let columns = (count as f64).sqrt().ceil() as usize;
    (columns, count.div_ceil(columns))
}

/// A frame plus its cards, ready for the caller to insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub frame: Shape,
    pub cards: Vec<Shape>,
    pub columns: usize,
    pub rows: usize,
}

impl LayoutResult {
    pub fn frame_id(&self) -> &ShapeId {
        &self.frame.id
    }

    /// All shapes, frame first.
    pub fn into_shapes(self) -> Vec<Shape> {
        let mut shapes = Vec::with_capacity(self.cards.len() + 1);
        shapes.push(self.frame);
        shapes.extend(self.cards);
        shapes
    }
}

/// Builds layouts with a given card geometry and placement policy.
#[derive(Debug, Clone, Default)]
pub struct LayoutGenerator {
    config: LayoutConfig,
    placer: Placer,
}

impl LayoutGenerator {
    pub fn new(config: LayoutConfig, placement: PlacementConfig) -> Self {
        Self {
            config,
            placer: Placer::new(placement),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Frame size needed for a `columns` x `rows` card grid.
    pub fn frame_size(&self, columns: usize, rows: usize) -> Size {
        let c = &self.config;
        let span = |count: usize, card: f64| {
            count as f64 * card + count.saturating_sub(1) as f64 * c.gap
        };
        Size::new(
            2.0 * c.padding + span(columns, c.card_width),
            c.title_height + 2.0 * c.padding + span(rows, c.card_height),
        )
    }

    /// Lay out `text` around `center`, avoiding `shapes`.
    ///
    /// Returns `None` when the text has no list items.
    pub fn generate(&self, text: &str, center: Point, shapes: &[Shape]) -> Option<LayoutResult> {
        let parsed = parse_list(text);
        if parsed.items.is_empty() {
            log::debug!("Layout text has no list items; nothing to lay out");
            return None;
        }

        let (columns, rows) = grid_dimensions(parsed.items.len());
        let frame_size = self.frame_size(columns, rows);
        let desired = Point::new(
            center.x - frame_size.width / 2.0,
            center.y - frame_size.height / 2.0,
        );
        let anchor = self.placer.find_free_position(desired, frame_size, shapes);

        let title = parsed
            .title
            .unwrap_or_else(|| self.config.default_title.clone());
        let frame = Shape::stage(anchor, frame_size, title);

        let c = &self.config;
        let card_size = Size::new(c.card_width, c.card_height);
        let cards = parsed
            .items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let (column, row) = (i % columns, i / columns);
                let position = Point::new(
                    anchor.x + c.padding + column as f64 * (c.card_width + c.gap),
                    anchor.y + c.title_height + c.padding + row as f64 * (c.card_height + c.gap),
                );
                Shape::sticky_note(position, card_size, item)
                    .with_fill(c.card_fill)
                    .in_stage(frame.id.clone())
            })
            .collect::<Vec<_>>();

        log::debug!(
            "Laid out {} cards in a {}x{} grid at ({}, {})",
            cards.len(),
            columns,
            rows,
            anchor.x,
            anchor.y
        );

        Some(LayoutResult {
            frame,
            cards,
            columns,
            rows,
        })
    }
}

/// [`LayoutGenerator::generate`] with default settings.
pub fn generate_layout(text: &str, center: Point, shapes: &[Shape]) -> Option<LayoutResult> {
    LayoutGenerator::default().generate(text, center, shapes)
}
