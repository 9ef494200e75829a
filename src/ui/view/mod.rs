//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod carousel;
pub mod components;
pub mod layouts;
pub mod pages;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

use super::state::{App, AppMode, HitMap, Page};
use components::render_tabs;

/// 渲染 UI，并记录本帧的可点击区域
pub fn render(frame: &mut Frame, app: &mut App) {
    let banner_height = if app.show_live_banner() { 1 } else { 0 };
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(banner_height), Constraint::Min(0)])
        .split(frame.area());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标签栏
            Constraint::Min(8),    // 页面
            Constraint::Length(3), // 帮助
        ])
        .split(outer[1]);

    let mut hits = HitMap {
        banner_close: pages::render_live_banner(frame, app, outer[0]),
        tabs: render_tabs(frame, chunks[0], app.page),
        ..HitMap::default()
    };

    match app.page {
        Page::Home => pages::render_home(frame, app, chunks[1]),
        Page::Sermons => hits.carousel = pages::render_sermons(frame, app, chunks[1]),
        Page::Testimonials => hits.carousel = pages::render_testimonials(frame, app, chunks[1]),
        Page::Events => pages::render_events(frame, app, chunks[1]),
        Page::Blog => pages::render_blog(frame, app, chunks[1]),
        Page::Choir => hits.progress_bar = Some(pages::render_choir(frame, app, chunks[1])),
        Page::Contact => pages::render_contact(frame, app, chunks[1]),
    }

    render_help(frame, app, chunks[2]);

    // 渲染弹窗
    if let AppMode::Reading(index) = app.mode {
        pages::render_post_dialog(frame, app, index);
        // 弹窗遮住页面，只保留横幅和标签栏可点击
        hits.carousel = None;
        hits.progress_bar = None;
    }

    app.hits = hits;
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match (&app.mode, app.page) {
        (AppMode::Reading(_), _) => "[Esc] 返回列表  [Tab] 下一页  [q] 退出",
        (_, Page::Sermons | Page::Testimonials) => {
            "[h/l] 上一条/下一条  拖拽滑动  [Tab/1-7] 切换页面  [q] 退出"
        }
        (_, Page::Events) => "[j/k] 选择问题  [Enter] 展开/收起  [Tab/1-7] 切换页面  [q] 退出",
        (_, Page::Blog) => "[j/k] 选择  [Enter] 阅读  [Tab/1-7] 切换页面  [q] 退出",
        (_, Page::Choir) => "[Space] 播放/暂停  [[/]] 后退/前进10秒  [m] 静音  [q] 退出",
        _ if app.show_live_banner() => "[x] 关闭直播横幅  [Tab/1-7] 切换页面  [q] 退出",
        _ => "[Tab/1-7] 切换页面  [q] 退出",
    };

    let message = app.message.as_deref().unwrap_or("");
    let text = if message.is_empty() {
        help_text.to_string()
    } else {
        format!("{}  |  {}", help_text, message)
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}
