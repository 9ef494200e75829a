//! 轮播渲染外壳
//!
//! 只负责如实反映 [`SwipeTracker`] 的状态：横向排列卡片、拖拽时平移、
//! 左右箭头、指示点。

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Paragraph, Widget},
};

use crate::swipe::SwipeTracker;
use crate::ui::state::CarouselHits;

const ARROW_WIDTH: u16 = 3;

/// 当前可见的卡片及其相对视口左边缘的列偏移
///
/// 整条带的位置为 `-(current * width) + offset`，只返回与视口相交的卡片。
pub fn strip_layout(width: u16, current: usize, count: usize, offset: f32) -> Vec<(usize, i32)> {
    if count == 0 || width == 0 {
        return Vec::new();
    }
    let width = i32::from(width);
    // 没有邻居的方向上最多移动 width - 1 列，当前卡片始终可见
    let max_right = if current > 0 { width } else { width - 1 };
    let max_left = if current + 1 < count { width } else { width - 1 };
    let shift = if offset.is_finite() {
        (offset.round() as i32).clamp(-max_left, max_right)
    } else {
        0
    };

    let mut visible = vec![(current, shift)];
    if shift > 0 && current > 0 {
        visible.insert(0, (current - 1, shift - width));
    } else if shift < 0 && current + 1 < count {
        visible.push((current + 1, shift + width));
    }
    visible.retain(|(_, x)| *x > -width && *x < width);
    visible
}

/// 渲染轮播，返回可点击区域
pub fn render_carousel<'a>(
    frame: &mut Frame,
    area: Rect,
    tracker: &mut SwipeTracker,
    card: impl Fn(usize) -> Paragraph<'a>,
) -> CarouselHits {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(ARROW_WIDTH),
            Constraint::Min(1),
            Constraint::Length(ARROW_WIDTH),
        ])
        .split(rows[0]);

    let viewport = cols[1];
    tracker.set_item_width(f32::from(viewport.width));

    for (index, x_offset) in strip_layout(
        viewport.width,
        tracker.current_index(),
        tracker.item_count(),
        tracker.display_offset(),
    ) {
        blit(frame, viewport, x_offset, card(index));
    }

    let prev = tracker
        .can_go_prev()
        .then(|| render_arrow(frame, cols[0], "◀"));
    let next = tracker
        .can_go_next()
        .then(|| render_arrow(frame, cols[2], "▶"));
    let dots = render_dots(frame, rows[1], tracker.item_count(), tracker.current_index());

    CarouselHits {
        viewport,
        prev,
        next,
        dots,
    }
}

/// 把卡片渲染到临时缓冲区，再按偏移复制可见部分
fn blit(frame: &mut Frame, viewport: Rect, x_offset: i32, card: Paragraph<'_>) {
    let local = Rect::new(0, 0, viewport.width, viewport.height);
    let mut scratch = Buffer::empty(local);
    card.render(local, &mut scratch);

    let buf = frame.buffer_mut();
    for sy in 0..viewport.height {
        for sx in 0..viewport.width {
            let dx = i32::from(sx) + x_offset;
            let Ok(dx) = u16::try_from(dx) else {
                continue;
            };
            if dx >= viewport.width {
                continue;
            }
            let Some(src) = scratch.cell((sx, sy)).cloned() else {
                continue;
            };
            if let Some(dst) = buf.cell_mut((viewport.x + dx, viewport.y + sy)) {
                *dst = src;
            }
        }
    }
}

fn render_arrow(frame: &mut Frame, column: Rect, symbol: &str) -> Rect {
    let middle = Rect::new(column.x, column.y + column.height / 2, column.width, 1);
    frame.render_widget(
        Paragraph::new(symbol)
            .centered()
            .style(Style::default().fg(Color::Yellow)),
        middle,
    );
    middle
}

/// 指示点：每条一个，当前条高亮；不足两条时不显示
fn render_dots(frame: &mut Frame, row: Rect, count: usize, current: usize) -> Vec<Rect> {
    if count <= 1 || row.height == 0 {
        return Vec::new();
    }
    let total = u16::try_from(count * 2 - 1).unwrap_or(u16::MAX);
    let start = row.x + row.width.saturating_sub(total) / 2;

    let buf = frame.buffer_mut();
    let mut rects = Vec::with_capacity(count);
    for i in 0..count {
        let Ok(step) = u16::try_from(i * 2) else {
            break;
        };
        let x = start.saturating_add(step);
        if x >= row.right() {
            break;
        }
        let (symbol, style) = if i == current {
            (
                "●",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("○", Style::default().fg(Color::DarkGray))
        };
        buf.set_string(x, row.y, symbol, style);
        rects.push(Rect::new(x, row.y, 1, 1));
    }
    rects
}
