//! 通用 UI 组件
//!
//! 弹窗、卡片、标签栏等通用组件

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::ui::state::Page;

/// [组件] 弹窗基础框架
pub fn render_dialog_framework(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// [组件] 带边框的卡片
pub fn card<'a>(title: String, lines: Vec<Line<'a>>) -> Paragraph<'a> {
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
}

/// [组件] 标签栏，返回每个标签的点击区域
pub fn render_tabs(frame: &mut Frame, area: Rect, current: Page) -> Vec<(Rect, Page)> {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);

    let mut spans = Vec::new();
    let mut rects = Vec::new();
    let mut x = inner.x;
    for (i, page) in Page::ALL.iter().enumerate() {
        let label = format!(" {} {} ", i + 1, page.title());
        let width = u16::try_from(label.chars().count()).unwrap_or(u16::MAX);
        let visible = width.min(inner.right().saturating_sub(x));
        if visible > 0 {
            rects.push((Rect::new(x, inner.y, visible, 1), *page));
        }
        x = x.saturating_add(width);

        let style = if *page == current {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(label, style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    rects
}
