//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use std::time::Duration;

use ratatui::layout::Rect;
use tracing::debug;

use crate::config::Config;
use crate::models::{BlogPost, ParishContent};
use crate::player::Player;
use crate::schedule::{self, Clock};
use crate::swipe::SwipeTracker;

/// 页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Sermons,
    Testimonials,
    Events,
    Blog,
    Choir,
    Contact,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Home,
        Page::Sermons,
        Page::Testimonials,
        Page::Events,
        Page::Blog,
        Page::Choir,
        Page::Contact,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Sermons => "Sermons",
            Page::Testimonials => "Testimonies",
            Page::Events => "Events & FAQ",
            Page::Blog => "Blog",
            Page::Choir => "Choir & Media",
            Page::Contact => "Contact",
        }
    }

    pub fn position(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    /// 按数字键 (1-based) 选择页面
    pub fn from_number(n: usize) -> Option<Page> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn next(self) -> Page {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Page {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Browsing,
    Reading(usize), // 正在阅读的文章索引
}

/// 轮播可点击区域
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarouselHits {
    pub viewport: Rect,
    pub prev: Option<Rect>,
    pub next: Option<Rect>,
    pub dots: Vec<Rect>,
}

/// 上一帧渲染出的可点击区域，用于鼠标命中测试
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitMap {
    pub banner_close: Option<Rect>,
    pub tabs: Vec<(Rect, Page)>,
    pub carousel: Option<CarouselHits>,
    pub progress_bar: Option<Rect>,
}

/// 应用状态
pub struct App {
    pub content: ParishContent,
    pub page: Page,
    pub mode: AppMode,
    pub sermons: SwipeTracker,
    pub testimonials: SwipeTracker,
    pub blog_selected: usize,
    pub faq_selected: usize,
    pub faq_open: Option<usize>, // 展开的问题，同一时间只展开一个
    pub player: Player,
    pub clock: Box<dyn Clock>,
    pub live: bool,
    pub banner_dismissed: bool,
    pub message: Option<String>,
    pub hits: HitMap,
    pub drag_column: Option<u16>, // 拖拽中上一次的鼠标列
    pub auto_advance: Option<Duration>,
    pub auto_advance_elapsed: Duration,
}

impl App {
    /// 创建新的应用实例
    pub fn new(content: ParishContent, config: &Config, clock: Box<dyn Clock>) -> Self {
        let ratio = config.carousel.threshold_ratio;

        let mut sermons = SwipeTracker::new(content.sermons.len()).with_threshold_ratio(ratio);
        sermons.set_on_change(|index| debug!(index, "sermon carousel committed"));

        let mut testimonials =
            SwipeTracker::new(content.testimonials.len()).with_threshold_ratio(ratio);
        testimonials.set_on_change(|index| debug!(index, "testimonial carousel committed"));

        let player = Player::new(content.track.clone());

        let mut app = Self {
            content,
            page: Page::Home,
            mode: AppMode::Browsing,
            sermons,
            testimonials,
            blog_selected: 0,
            faq_selected: 0,
            faq_open: None,
            player,
            clock,
            live: false,
            banner_dismissed: false,
            message: None,
            hits: HitMap::default(),
            drag_column: None,
            auto_advance: config.auto_advance(),
            auto_advance_elapsed: Duration::ZERO,
        };
        app.live = app.compute_live();
        app
    }

    /// 当前页面的轮播
    pub fn active_carousel_mut(&mut self) -> Option<&mut SwipeTracker> {
        match self.page {
            Page::Sermons => Some(&mut self.sermons),
            Page::Testimonials => Some(&mut self.testimonials),
            _ => None,
        }
    }

    /// 获取当前选中的文章
    pub fn selected_post(&self) -> Option<&BlogPost> {
        self.content.posts.get(self.blog_selected)
    }

    /// 直播横幅是否显示
    pub fn show_live_banner(&self) -> bool {
        self.live && !self.banner_dismissed
    }

    pub fn compute_live(&self) -> bool {
        let windows = self.content.services.iter().map(|service| &service.window);
        schedule::is_live(windows, self.clock.now())
    }
}
