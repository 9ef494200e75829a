//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑和各种处理方法

use std::time::Duration;

use tracing::{debug, info};

use super::actions::Action;
use super::state::{App, AppMode, Page};
use crate::swipe::{DragOutcome, SwipeTracker};

impl App {
    /// 核心逻辑分发，返回是否退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::NextPage => self.switch_page(self.page.next()),
            Action::PrevPage => self.switch_page(self.page.prev()),
            Action::GoToPage(page) => self.switch_page(page),

            Action::CarouselPrev => self.navigate(|c| c.go_prev()),
            Action::CarouselNext => self.navigate(|c| c.go_next()),
            Action::CarouselGoTo(index) => {
                let index = isize::try_from(index).unwrap_or(isize::MAX);
                self.navigate(|c| c.go_to(index));
            }
            Action::DragStart(column) => self.drag_start(column),
            Action::DragMove(column) => self.drag_move(column),
            Action::DragEnd => self.drag_end(),
            Action::DragCancel => self.drag_cancel(),

            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),
            Action::Activate => self.activate(),
            Action::Cancel => self.cancel(),
            Action::DismissBanner => self.dismiss_banner(),

            Action::TogglePlay => self.when_on(Page::Choir, |app| app.player.toggle_play()),
            Action::ToggleMute => self.when_on(Page::Choir, |app| app.player.toggle_mute()),
            Action::Skip(seconds) => self.when_on(Page::Choir, |app| app.player.skip(seconds)),
            Action::Seek(fraction) => {
                self.when_on(Page::Choir, |app| app.player.seek_fraction(fraction))
            }

            Action::Tick(elapsed) => self.tick(elapsed),
        }
        false
    }

    // ============ 页面相关 ============

    /// 切换页面，未完成的拖拽一律回弹
    pub fn switch_page(&mut self, page: Page) {
        if page == self.page {
            return;
        }
        self.drag_cancel();
        self.page = page;
        self.mode = AppMode::Browsing;
        self.message = None;
        self.hits = Default::default();
        self.auto_advance_elapsed = Duration::ZERO;
        debug!(page = page.title(), "switched page");
    }

    fn when_on(&mut self, page: Page, f: impl FnOnce(&mut Self)) {
        if self.page == page {
            f(self);
        }
    }

    // ============ 轮播相关 ============

    fn navigate(&mut self, f: impl FnOnce(&mut SwipeTracker) -> bool) {
        let moved = match self.active_carousel_mut() {
            Some(carousel) if !carousel.is_swiping() => f(carousel),
            _ => false,
        };
        if moved {
            self.auto_advance_elapsed = Duration::ZERO;
        }
    }

    pub fn drag_start(&mut self, column: u16) {
        let Some(carousel) = self.active_carousel_mut() else {
            return;
        };
        carousel.on_drag_start();
        if carousel.is_swiping() {
            self.drag_column = Some(column);
        }
    }

    pub fn drag_move(&mut self, column: u16) {
        let Some(last) = self.drag_column else {
            return;
        };
        let delta = f32::from(column) - f32::from(last);
        if let Some(carousel) = self.active_carousel_mut() {
            carousel.on_drag_move(delta);
        }
        self.drag_column = Some(column);
    }

    pub fn drag_end(&mut self) {
        self.drag_column = None;
        let outcome = match self.active_carousel_mut() {
            Some(carousel) => carousel.on_drag_end(),
            None => DragOutcome::Ignored,
        };
        if let DragOutcome::Committed { from, to } = outcome {
            debug!(from, to, "swipe committed");
            self.auto_advance_elapsed = Duration::ZERO;
        }
    }

    pub fn drag_cancel(&mut self) {
        self.drag_column = None;
        if let Some(carousel) = self.active_carousel_mut() {
            carousel.on_drag_cancel();
        }
    }

    // ============ 列表相关 ============

    /// 向上移动选择（博客或常见问题）
    pub fn move_up(&mut self) {
        match self.page {
            Page::Blog => self.blog_selected = self.blog_selected.saturating_sub(1),
            Page::Events => self.faq_selected = self.faq_selected.saturating_sub(1),
            _ => {}
        }
    }

    /// 向下移动选择
    pub fn move_down(&mut self) {
        match self.page {
            Page::Blog if self.blog_selected + 1 < self.content.posts.len() => {
                self.blog_selected += 1;
            }
            Page::Events if self.faq_selected + 1 < self.content.faqs.len() => {
                self.faq_selected += 1;
            }
            _ => {}
        }
    }

    fn activate(&mut self) {
        match self.page {
            Page::Blog => self.open_post(),
            Page::Events => self.toggle_faq(),
            _ => {}
        }
    }

    pub fn open_post(&mut self) {
        if let Some(post) = self.selected_post() {
            debug!(id = %post.id, "opened post");
            self.mode = AppMode::Reading(self.blog_selected);
        }
    }

    /// 展开选中的问题；再次确认则收起
    pub fn toggle_faq(&mut self) {
        if self.faq_selected >= self.content.faqs.len() {
            return;
        }
        self.faq_open = match self.faq_open {
            Some(open) if open == self.faq_selected => None,
            _ => Some(self.faq_selected),
        };
    }

    /// 取消当前操作
    pub fn cancel(&mut self) {
        self.drag_cancel();
        self.mode = AppMode::Browsing;
        self.message = None;
    }

    // ============ 定时刷新 ============

    pub fn tick(&mut self, elapsed: Duration) {
        self.player.tick(elapsed);
        self.refresh_live();
        self.advance_testimonials(elapsed);
    }

    /// 关闭直播横幅，直到下一次礼拜开始
    pub fn dismiss_banner(&mut self) {
        if self.live && !self.banner_dismissed {
            debug!("live banner dismissed");
            self.banner_dismissed = true;
        }
    }

    /// 刷新直播状态
    pub fn refresh_live(&mut self) {
        let live = self.compute_live();
        if live != self.live {
            info!(live, "live service status changed");
            self.message = live.then(|| "A service is live now".to_string());
            self.banner_dismissed = false;
        }
        self.live = live;
    }

    /// 见证轮播自动切换：拖拽中暂停，到末尾回到第一条
    fn advance_testimonials(&mut self, elapsed: Duration) {
        let Some(interval) = self.auto_advance else {
            return;
        };
        if self.page != Page::Testimonials || self.testimonials.is_swiping() {
            return;
        }
        self.auto_advance_elapsed += elapsed;
        if self.auto_advance_elapsed < interval {
            return;
        }
        self.auto_advance_elapsed = Duration::ZERO;
        if !self.testimonials.go_next() {
            self.testimonials.go_to(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::ParishContent;
    use crate::schedule::FixedClock;
    use chrono::NaiveDate;

    fn clock(h: u32) -> Box<FixedClock> {
        // 2026-10-18 是星期日
        let now = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap();
        Box::new(FixedClock(now))
    }

    fn app() -> App {
        App::new(ParishContent::default(), &Config::default(), clock(8))
    }

    fn sermons_app(width: f32) -> App {
        let mut app = app();
        app.dispatch(Action::GoToPage(Page::Sermons));
        app.sermons.set_item_width(width);
        app
    }

    #[test]
    fn test_drag_sequence_commits_next_sermon() {
        let mut app = sermons_app(40.0);
        app.dispatch(Action::DragStart(30));
        app.dispatch(Action::DragMove(25));
        app.dispatch(Action::DragMove(18));
        assert_eq!(app.sermons.current_index(), 0);
        assert_eq!(app.sermons.swipe_offset(), -12.0);

        app.dispatch(Action::DragEnd);
        assert_eq!(app.sermons.current_index(), 1);
        assert_eq!(app.sermons.swipe_offset(), 0.0);
        assert_eq!(app.drag_column, None);
    }

    #[test]
    fn test_short_drag_snaps_back() {
        let mut app = sermons_app(40.0);
        app.dispatch(Action::DragStart(30));
        app.dispatch(Action::DragMove(26));
        app.dispatch(Action::DragEnd);
        assert_eq!(app.sermons.current_index(), 0);
    }

    #[test]
    fn test_switching_page_cancels_drag() {
        let mut app = sermons_app(40.0);
        app.dispatch(Action::DragStart(30));
        app.dispatch(Action::DragMove(0));
        app.dispatch(Action::NextPage);
        assert_eq!(app.page, Page::Testimonials);
        assert!(!app.sermons.is_swiping());
        assert_eq!(app.sermons.current_index(), 0);
        assert_eq!(app.drag_column, None);
    }

    #[test]
    fn test_buttons_ignored_mid_drag() {
        let mut app = sermons_app(40.0);
        app.dispatch(Action::DragStart(30));
        app.dispatch(Action::CarouselNext);
        assert_eq!(app.sermons.current_index(), 0);
    }

    #[test]
    fn test_carousel_actions_need_carousel_page() {
        let mut app = app();
        app.dispatch(Action::CarouselNext);
        app.dispatch(Action::DragStart(10));
        assert_eq!(app.drag_column, None);
        assert_eq!(app.sermons.current_index(), 0);
        assert_eq!(app.testimonials.current_index(), 0);
    }

    #[test]
    fn test_carousel_go_to_clamps() {
        let mut app = sermons_app(40.0);
        app.dispatch(Action::CarouselGoTo(usize::MAX));
        assert_eq!(app.sermons.current_index(), app.content.sermons.len() - 1);
    }

    #[test]
    fn test_blog_open_and_close() {
        let mut app = app();
        app.dispatch(Action::GoToPage(Page::Blog));
        app.dispatch(Action::MoveSelectionDown);
        app.dispatch(Action::Activate);
        assert_eq!(app.mode, AppMode::Reading(1));
        app.dispatch(Action::Cancel);
        assert_eq!(app.mode, AppMode::Browsing);

        for _ in 0..10 {
            app.dispatch(Action::MoveSelectionDown);
        }
        assert_eq!(app.blog_selected, app.content.posts.len() - 1);
    }

    #[test]
    fn test_faq_accordion_opens_one_at_a_time() {
        let mut app = app();
        app.dispatch(Action::Activate);
        assert_eq!(app.faq_open, None);

        app.dispatch(Action::GoToPage(Page::Events));
        app.dispatch(Action::Activate);
        assert_eq!(app.faq_open, Some(0));

        app.dispatch(Action::MoveSelectionDown);
        app.dispatch(Action::MoveSelectionDown);
        app.dispatch(Action::Activate);
        assert_eq!(app.faq_open, Some(2));

        app.dispatch(Action::Activate);
        assert_eq!(app.faq_open, None);

        for _ in 0..20 {
            app.dispatch(Action::MoveSelectionDown);
        }
        assert_eq!(app.faq_selected, app.content.faqs.len() - 1);
        app.dispatch(Action::MoveSelectionUp);
        assert_eq!(app.faq_selected, app.content.faqs.len() - 2);
        assert_eq!(app.blog_selected, 0);
    }

    #[test]
    fn test_banner_dismissal_lasts_until_next_service() {
        let mut app = app();
        app.dispatch(Action::DismissBanner);
        assert!(!app.banner_dismissed);

        app.clock = clock(11);
        app.dispatch(Action::Tick(Duration::from_millis(250)));
        assert!(app.show_live_banner());
        app.dispatch(Action::DismissBanner);
        assert!(app.live);
        assert!(!app.show_live_banner());

        // 礼拜结束后再开始，横幅重新出现
        app.clock = clock(15);
        app.dispatch(Action::Tick(Duration::from_millis(250)));
        app.clock = clock(12);
        app.dispatch(Action::Tick(Duration::from_millis(250)));
        assert!(app.show_live_banner());
    }

    #[test]
    fn test_player_controls_only_on_choir_page() {
        let mut app = app();
        app.dispatch(Action::TogglePlay);
        assert!(!app.player.is_playing());

        app.dispatch(Action::GoToPage(Page::Choir));
        app.dispatch(Action::TogglePlay);
        app.dispatch(Action::Tick(Duration::from_secs(3)));
        assert!(app.player.is_playing());
        assert_eq!(app.player.position(), Duration::from_secs(3));

        app.dispatch(Action::Skip(-10));
        assert_eq!(app.player.position(), Duration::ZERO);
    }

    #[test]
    fn test_live_flag_follows_clock() {
        let mut app = app();
        assert!(!app.live);
        app.clock = clock(11);
        app.dispatch(Action::Tick(Duration::from_millis(250)));
        assert!(app.live);
        assert!(app.message.is_some());
    }

    #[test]
    fn test_auto_advance_wraps_and_pauses_while_swiping() {
        let mut config = Config::default();
        config.carousel.auto_advance_secs = 5;
        let mut app = App::new(ParishContent::default(), &config, clock(8));
        app.dispatch(Action::GoToPage(Page::Testimonials));
        let count = app.content.testimonials.len();

        app.dispatch(Action::Tick(Duration::from_secs(4)));
        assert_eq!(app.testimonials.current_index(), 0);
        app.dispatch(Action::Tick(Duration::from_secs(1)));
        assert_eq!(app.testimonials.current_index(), 1);

        app.dispatch(Action::DragStart(10));
        app.dispatch(Action::Tick(Duration::from_secs(10)));
        assert_eq!(app.testimonials.current_index(), 1);
        app.dispatch(Action::DragCancel);

        for _ in 0..count - 1 {
            app.dispatch(Action::Tick(Duration::from_secs(5)));
        }
        assert_eq!(app.testimonials.current_index(), 0);
    }
}
