//! 键盘/鼠标事件映射 (Input -> Action)
//!
//! 将按键和鼠标事件转换为 Action

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use super::actions::Action;
use super::state::{App, AppMode, HitMap, Page};

const SKIP_SECONDS: i64 = 10;

/// 根据当前模式和按键获取对应的 Action
pub fn get_action(mode: &AppMode, key: KeyCode) -> Option<Action> {
    match mode {
        AppMode::Browsing => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Tab => Some(Action::NextPage),
            KeyCode::BackTab => Some(Action::PrevPage),
            KeyCode::Char(c @ '1'..='9') => c
                .to_digit(10)
                .and_then(|n| Page::from_number(n as usize))
                .map(Action::GoToPage),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::CarouselPrev),
            KeyCode::Char('l') | KeyCode::Right => Some(Action::CarouselNext),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            KeyCode::Enter => Some(Action::Activate),
            KeyCode::Char(' ') => Some(Action::TogglePlay),
            KeyCode::Char('m') => Some(Action::ToggleMute),
            KeyCode::Char('x') => Some(Action::DismissBanner),
            KeyCode::Char('[') => Some(Action::Skip(-SKIP_SECONDS)),
            KeyCode::Char(']') => Some(Action::Skip(SKIP_SECONDS)),
            KeyCode::Esc => Some(Action::Cancel),
            _ => None,
        },
        AppMode::Reading(_) => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Enter => Some(Action::Cancel),
            KeyCode::Tab => Some(Action::NextPage),
            KeyCode::BackTab => Some(Action::PrevPage),
            _ => None,
        },
    }
}

/// 根据上一帧的可点击区域获取鼠标对应的 Action
pub fn get_mouse_action(hits: &HitMap, dragging: bool, mouse: MouseEvent) -> Option<Action> {
    let pos = Position::new(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => press_action(hits, pos),
        MouseEventKind::Drag(MouseButton::Left) if dragging => Some(Action::DragMove(mouse.column)),
        MouseEventKind::Up(MouseButton::Left) if dragging => Some(Action::DragEnd),
        MouseEventKind::Down(_) if dragging => Some(Action::DragCancel),
        _ => None,
    }
}

fn press_action(hits: &HitMap, pos: Position) -> Option<Action> {
    if hit(hits.banner_close, pos) {
        return Some(Action::DismissBanner);
    }

    if let Some((_, page)) = hits.tabs.iter().find(|(rect, _)| rect.contains(pos)) {
        return Some(Action::GoToPage(*page));
    }

    if let Some(carousel) = &hits.carousel {
        if hit(carousel.prev, pos) {
            return Some(Action::CarouselPrev);
        }
        if hit(carousel.next, pos) {
            return Some(Action::CarouselNext);
        }
        if let Some(i) = carousel.dots.iter().position(|rect| rect.contains(pos)) {
            return Some(Action::CarouselGoTo(i));
        }
        if carousel.viewport.contains(pos) {
            return Some(Action::DragStart(pos.x));
        }
    }

    if let Some(bar) = hits.progress_bar {
        if bar.contains(pos) {
            return Some(Action::Seek(seek_fraction(bar, pos.x)));
        }
    }

    None
}

fn hit(rect: Option<Rect>, pos: Position) -> bool {
    rect.is_some_and(|r| r.contains(pos))
}

/// 进度条上某一列对应的比例，最后一列为 1.0
fn seek_fraction(bar: Rect, column: u16) -> f64 {
    let span = bar.width.saturating_sub(1);
    if span == 0 {
        return 0.0;
    }
    f64::from(column.saturating_sub(bar.x)) / f64::from(span)
}

/// 处理按键事件，返回是否退出
pub fn handle_key_event(app: &mut App, key: KeyCode) -> bool {
    match get_action(&app.mode, key) {
        Some(action) => app.dispatch(action),
        None => false,
    }
}

/// 处理鼠标事件
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> bool {
    match get_mouse_action(&app.hits, app.drag_column.is_some(), mouse) {
        Some(action) => app.dispatch(action),
        None => false,
    }
}
