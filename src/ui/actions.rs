//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

use std::time::Duration;

use super::state::Page;

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    NextPage,
    PrevPage,
    GoToPage(Page),

    // 轮播
    CarouselPrev,
    CarouselNext,
    CarouselGoTo(usize),
    DragStart(u16), // 鼠标列
    DragMove(u16),
    DragEnd,
    DragCancel,

    // 博客 / 常见问题
    MoveSelectionUp,
    MoveSelectionDown,
    Activate, // 打开文章或展开问题
    Cancel,   // Esc

    DismissBanner,

    // 播放器
    TogglePlay,
    ToggleMute,
    Skip(i64),
    Seek(f64),

    Tick(Duration),
}
