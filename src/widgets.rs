//! Clickable UI components: each one renders and registers its own click targets.
//!
//! - [`TabBar`]: horizontal tabs.
//! - [`ClickableList`]: lines of text, some of which are buttons.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// Tabs on one row, separated by `separator`. Click targets follow the
/// rendered label widths.
///
/// ```ignore
/// TabBar::new(" │ ")
///     .tab("Upgrades", style, TAB_UPGRADES)
///     .tab("Moonbase", style, TAB_MOONBASE)
///     .render(f, area, &mut cs);
/// ```
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    /// Wrap the bar in a block; targets are placed inside its borders.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// `(padded label width, action id)` per tab.
    fn label_widths(&self) -> Vec<(u16, u16)> {
        self.tabs
            .iter()
            .map(|(label, _, id)| (Line::from(format!(" {} ", label)).width() as u16, *id))
            .collect()
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let widths = self.label_widths();
        let sep_width = Line::from(self.separator).width() as u16;

        let mut spans: Vec<Span> = Vec::new();
        for (i, (label, style, _)) in self.tabs.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.separator, Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::styled(format!(" {} ", label), style));
        }

        let inner = self.block.as_ref().map_or(area, |b| b.inner(area));
        let paragraph = Paragraph::new(Line::from(spans));
        let paragraph = match self.block {
            Some(block) => paragraph.block(block),
            None => paragraph,
        };
        f.render_widget(paragraph, area);

        // Inner x/width for column accuracy, full height for tap tolerance.
        cs.register_tab_targets(&widths, sep_width, inner.x, area.y, inner.width, area.height.max(1));
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines paired with optional click actions. Targets follow each line to
/// whatever row it lands on, including after wrapping.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Moonbase"));
/// cl.push_clickable(Line::from("[1] Habitat Dome"), INVEST_MODULE_BASE);
/// cl.register_targets(area, &mut cs, 1, 1, 0, inner.width);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line index, action id)`
    actions: Vec<(usize, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len(), action_id));
        self.lines.push(line);
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Rows the content occupies when wrapped to `inner_width` (0 = no wrapping).
    pub fn visual_height(&self, inner_width: u16) -> u16 {
        if inner_width == 0 {
            return self.lines.len() as u16;
        }
        Paragraph::new(self.lines.clone())
            .wrap(Wrap { trim: false })
            .line_count(inner_width) as u16
    }

    /// `(first visual row, row count)` per logical line.
    fn visual_rows(&self, inner_width: u16) -> Vec<(u16, u16)> {
        let w = inner_width as usize;
        let mut rows = Vec::with_capacity(self.lines.len());
        let mut cursor: u16 = 0;
        for line in &self.lines {
            let lw = line.width();
            let h = if w == 0 || lw <= w { 1 } else { lw.div_ceil(w) as u16 };
            rows.push((cursor, h));
            cursor += h;
        }
        rows
    }

    /// Register a target on every visible row of every clickable line.
    ///
    /// `top_offset`/`bottom_offset` are rows taken by borders, `scroll` is the
    /// vertical scroll in visual rows, `inner_width` the wrap width (0 when the
    /// paragraph does not wrap).
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
        inner_width: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);
        let rows = self.visual_rows(inner_width);

        for &(line_idx, action_id) in &self.actions {
            let Some(&(start, height)) = rows.get(line_idx) else {
                continue;
            };
            for vr in start..start + height {
                if vr < scroll {
                    continue;
                }
                let screen_row = content_y + (vr - scroll);
                if screen_row >= content_end {
                    break;
                }
                cs.add_row_target(area, screen_row, action_id);
            }
        }
    }
}
