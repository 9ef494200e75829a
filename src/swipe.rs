//! 滑动手势追踪 (Swipe Tracker)
//!
//! 将拖拽事件序列转换为：
//! - 拖拽过程中的视觉偏移 (`swipe_offset`)
//! - 拖拽结束时提交的索引变化 (±1) 或回弹
//!
//! 与渲染框架解耦，所有输入都会被夹紧 (clamp)，任何输入都不会 panic。

use std::fmt;

/// 默认提交阈值：条目宽度的 25%
pub const DEFAULT_THRESHOLD_RATIO: f32 = 0.25;

/// 越界拖拽时的橡皮筋阻尼系数
pub const RUBBER_BAND_FACTOR: f32 = 0.3;

/// 一次拖拽手势的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// 索引已改变
    Committed { from: usize, to: usize },
    /// 未越过阈值（或已在边界），回弹
    SnappedBack,
    /// 当前没有进行中的拖拽
    Ignored,
}

type ChangeObserver = Box<dyn FnMut(usize)>;

/// 轮播状态
pub struct SwipeTracker {
    item_count: usize,
    current_index: usize,
    swipe_offset: f32,
    is_swiping: bool,
    item_width: f32,
    threshold_ratio: f32,
    on_change: Option<ChangeObserver>,
}

impl SwipeTracker {
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            current_index: 0,
            swipe_offset: 0.0,
            is_swiping: false,
            item_width: 1.0,
            threshold_ratio: DEFAULT_THRESHOLD_RATIO,
            on_change: None,
        }
    }

    /// 设置阈值比例，非法值回退为默认值
    pub fn with_threshold_ratio(mut self, ratio: f32) -> Self {
        self.threshold_ratio = if ratio.is_finite() && ratio > 0.0 {
            ratio
        } else {
            DEFAULT_THRESHOLD_RATIO
        };
        self
    }

    pub fn with_item_width(mut self, width: f32) -> Self {
        self.set_item_width(width);
        self
    }

    /// 注册索引提交回调（每次提交调用一次，拖拽移动时不调用）
    pub fn set_on_change(&mut self, observer: impl FnMut(usize) + 'static) {
        self.on_change = Some(Box::new(observer));
    }

    // ============ 状态查询 ============

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn swipe_offset(&self) -> f32 {
        self.swipe_offset
    }

    pub fn is_swiping(&self) -> bool {
        self.is_swiping
    }

    pub fn item_width(&self) -> f32 {
        self.item_width
    }

    /// 提交所需的最小偏移量
    pub fn threshold(&self) -> f32 {
        self.item_width * self.threshold_ratio
    }

    pub fn can_go_prev(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.current_index + 1 < self.item_count
    }

    /// 渲染层应使用的偏移：越界方向带橡皮筋阻尼
    pub fn display_offset(&self) -> f32 {
        if !self.is_swiping {
            return 0.0;
        }
        let past_start = self.swipe_offset > 0.0 && !self.can_go_prev();
        let past_end = self.swipe_offset < 0.0 && !self.can_go_next();
        if past_start || past_end {
            // 至少留一列，边缘卡片不会被完全拖出视口
            let limit = (self.item_width - 1.0).max(0.0);
            (self.swipe_offset * RUBBER_BAND_FACTOR).clamp(-limit, limit)
        } else {
            self.swipe_offset
        }
    }

    // ============ 宿主更新 ============

    /// 宿主在渲染时上报条目宽度
    pub fn set_item_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.item_width = width;
        }
    }

    // ============ 导航 ============

    pub fn go_next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.commit(self.current_index + 1)
    }

    pub fn go_prev(&mut self) -> bool {
        if !self.can_go_prev() {
            return false;
        }
        self.commit(self.current_index - 1)
    }

    /// 跳转到指定索引，越界输入静默夹紧
    pub fn go_to(&mut self, index: isize) -> bool {
        let target = self.clamp(index);
        self.commit(target)
    }

    // ============ 拖拽生命周期 ============

    /// 开始拖拽；拖拽中再次调用会重新开始本次手势
    pub fn on_drag_start(&mut self) {
        if self.item_count == 0 {
            return;
        }
        self.is_swiping = true;
        self.swipe_offset = 0.0;
    }

    /// 累加水平位移，仅影响视觉偏移
    pub fn on_drag_move(&mut self, delta: f32) {
        if !self.is_swiping || !delta.is_finite() {
            return;
        }
        self.swipe_offset += delta;
    }

    /// 结束拖拽：越过阈值则提交 ±1，否则回弹
    pub fn on_drag_end(&mut self) -> DragOutcome {
        if !self.is_swiping {
            return DragOutcome::Ignored;
        }
        let offset = self.swipe_offset;
        let threshold = self.threshold();
        self.reset_drag();

        let from = self.current_index;
        let moved = if offset <= -threshold {
            self.go_next()
        } else if offset >= threshold {
            self.go_prev()
        } else {
            false
        };

        if moved {
            DragOutcome::Committed {
                from,
                to: self.current_index,
            }
        } else {
            DragOutcome::SnappedBack
        }
    }

    /// 取消拖拽，等同于未越过阈值的结束
    pub fn on_drag_cancel(&mut self) -> DragOutcome {
        if !self.is_swiping {
            return DragOutcome::Ignored;
        }
        self.reset_drag();
        DragOutcome::SnappedBack
    }

    fn reset_drag(&mut self) {
        self.is_swiping = false;
        self.swipe_offset = 0.0;
    }

    fn clamp(&self, index: isize) -> usize {
        if self.item_count == 0 || index < 0 {
            return 0;
        }
        (index as usize).min(self.item_count - 1)
    }

    fn commit(&mut self, target: usize) -> bool {
        if target == self.current_index {
            return false;
        }
        self.current_index = target;
        if let Some(observer) = self.on_change.as_mut() {
            observer(target);
        }
        true
    }
}

impl fmt::Debug for SwipeTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwipeTracker")
            .field("item_count", &self.item_count)
            .field("current_index", &self.current_index)
            .field("swipe_offset", &self.swipe_offset)
            .field("is_swiping", &self.is_swiping)
            .field("item_width", &self.item_width)
            .field("threshold_ratio", &self.threshold_ratio)
            .field("has_observer", &self.on_change.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn tracker(count: usize) -> SwipeTracker {
        SwipeTracker::new(count).with_item_width(100.0)
    }

    fn drag(t: &mut SwipeTracker, deltas: &[f32]) -> DragOutcome {
        t.on_drag_start();
        for d in deltas {
            t.on_drag_move(*d);
        }
        t.on_drag_end()
    }

    #[test]
    fn test_drag_left_above_threshold_commits_next() {
        let mut t = tracker(5);
        t.go_to(2);

        let outcome = drag(&mut t, &[-60.0]);

        assert_eq!(outcome, DragOutcome::Committed { from: 2, to: 3 });
        assert_eq!(t.current_index(), 3);
        assert_eq!(t.swipe_offset(), 0.0);
        assert!(!t.is_swiping());
    }

    #[test]
    fn test_drag_right_above_threshold_commits_prev() {
        let mut t = tracker(5);
        t.go_to(2);

        assert_eq!(drag(&mut t, &[10.0, 20.0]), DragOutcome::Committed { from: 2, to: 1 });
        assert_eq!(t.current_index(), 1);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mut t = tracker(3);
        assert_eq!(drag(&mut t, &[-25.0]), DragOutcome::Committed { from: 0, to: 1 });
        assert_eq!(drag(&mut t, &[25.0]), DragOutcome::Committed { from: 1, to: 0 });
    }

    #[test]
    fn test_small_drag_snaps_back() {
        let mut t = tracker(5);
        t.go_to(2);

        assert_eq!(drag(&mut t, &[-10.0, -14.0]), DragOutcome::SnappedBack);
        assert_eq!(t.current_index(), 2);
        assert_eq!(t.swipe_offset(), 0.0);
    }

    #[test]
    fn test_index_never_changes_mid_drag() {
        let mut t = tracker(5);
        t.go_to(2);
        t.on_drag_start();
        for delta in [-80.0, -200.0, 500.0, -1000.0] {
            t.on_drag_move(delta);
            assert!(t.is_swiping());
            assert_eq!(t.current_index(), 2);
        }
        assert_eq!(t.swipe_offset(), -780.0);
        // 一次手势最多移动一格
        assert_eq!(t.on_drag_end(), DragOutcome::Committed { from: 2, to: 3 });
    }

    #[test]
    fn test_move_without_start_is_ignored() {
        let mut t = tracker(3);
        t.on_drag_move(-90.0);
        assert_eq!(t.swipe_offset(), 0.0);
        assert_eq!(t.on_drag_end(), DragOutcome::Ignored);
        assert_eq!(t.current_index(), 0);
    }

    #[test]
    fn test_non_finite_delta_is_ignored() {
        let mut t = tracker(3);
        t.on_drag_start();
        t.on_drag_move(f32::NAN);
        t.on_drag_move(f32::INFINITY);
        t.on_drag_move(-5.0);
        assert_eq!(t.swipe_offset(), -5.0);
    }

    #[test]
    fn test_cancel_snaps_back_even_past_threshold() {
        let mut t = tracker(3);
        t.on_drag_start();
        t.on_drag_move(-90.0);
        assert_eq!(t.on_drag_cancel(), DragOutcome::SnappedBack);
        assert_eq!(t.current_index(), 0);
        assert_eq!(t.swipe_offset(), 0.0);
        assert!(!t.is_swiping());
    }

    #[test]
    fn test_restart_drag_resets_offset() {
        let mut t = tracker(3);
        t.on_drag_start();
        t.on_drag_move(-90.0);
        t.on_drag_start();
        t.on_drag_move(-5.0);
        assert_eq!(t.on_drag_end(), DragOutcome::SnappedBack);
        assert_eq!(t.current_index(), 0);
    }

    #[test]
    fn test_go_next_at_last_is_noop() {
        let mut t = tracker(3);
        t.go_to(2);
        assert!(!t.go_next());
        assert_eq!(t.current_index(), 2);
        assert!(!t.can_go_next());
        assert!(t.can_go_prev());
    }

    #[test]
    fn test_go_prev_at_first_is_noop() {
        let mut t = tracker(3);
        assert!(!t.go_prev());
        assert_eq!(t.current_index(), 0);
        assert!(!t.can_go_prev());
        assert!(t.can_go_next());
    }

    #[test]
    fn test_go_to_clamps() {
        let mut t = tracker(4);
        t.go_to(-7);
        assert_eq!(t.current_index(), 0);
        t.go_to(99);
        assert_eq!(t.current_index(), 3);
        t.go_to(1);
        assert_eq!(t.current_index(), 1);
    }

    #[test]
    fn test_drag_past_boundary_snaps_back() {
        let mut t = tracker(3);
        assert_eq!(drag(&mut t, &[80.0]), DragOutcome::SnappedBack);
        assert_eq!(t.current_index(), 0);

        t.go_to(2);
        assert_eq!(drag(&mut t, &[-80.0]), DragOutcome::SnappedBack);
        assert_eq!(t.current_index(), 2);
    }

    #[test]
    fn test_single_item_never_navigates() {
        let mut t = tracker(1);
        assert!(!t.can_go_prev());
        assert!(!t.can_go_next());

        t.go_next();
        t.go_prev();
        t.go_to(5);
        t.go_to(-5);
        drag(&mut t, &[-100.0]);
        drag(&mut t, &[100.0]);

        assert_eq!(t.current_index(), 0);
        assert!(!t.can_go_prev());
        assert!(!t.can_go_next());
    }

    #[test]
    fn test_zero_items_degrade_gracefully() {
        let mut t = tracker(0);
        assert!(!t.can_go_prev());
        assert!(!t.can_go_next());
        assert!(!t.go_next());
        assert!(!t.go_prev());
        assert!(!t.go_to(3));
        assert!(!t.go_to(-3));

        t.on_drag_start();
        assert!(!t.is_swiping());
        t.on_drag_move(-50.0);
        assert_eq!(t.on_drag_end(), DragOutcome::Ignored);
        assert_eq!(t.current_index(), 0);
        assert_eq!(t.display_offset(), 0.0);
    }

    #[test]
    fn test_rapid_gestures_stay_in_bounds() {
        let mut t = tracker(4);
        for i in 0..200 {
            let delta = if i % 3 == 0 { 70.0 } else { -70.0 };
            drag(&mut t, &[delta / 2.0, delta / 2.0]);
            if i % 7 == 0 {
                t.go_to(i as isize - 100);
            }
            assert!(t.current_index() < t.item_count());
            assert!(!t.is_swiping());
            assert_eq!(t.swipe_offset(), 0.0);
        }
    }

    #[test]
    fn test_predicates_match_index() {
        let mut t = tracker(5);
        for target in -2..8 {
            t.go_to(target);
            let idx = t.current_index();
            assert_eq!(t.can_go_prev(), idx != 0);
            assert_eq!(t.can_go_next(), idx != t.item_count() - 1);
        }
    }

    #[test]
    fn test_rubber_band_past_edges() {
        let mut t = tracker(3);
        t.on_drag_start();
        t.on_drag_move(40.0);
        assert_eq!(t.display_offset(), 40.0 * RUBBER_BAND_FACTOR);
        t.on_drag_cancel();

        t.on_drag_start();
        t.on_drag_move(-40.0);
        assert_eq!(t.display_offset(), -40.0);
        t.on_drag_cancel();

        assert_eq!(t.display_offset(), 0.0);
    }

    #[test]
    fn test_observer_called_once_per_commit() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut t = tracker(4);
        t.set_on_change(move |idx| sink.borrow_mut().push(idx));

        t.on_drag_start();
        t.on_drag_move(-30.0);
        t.on_drag_move(-30.0);
        assert!(seen.borrow().is_empty());
        t.on_drag_end();

        t.go_next();
        t.go_next();
        t.go_next(); // 已在末尾
        t.go_to(3); // 未改变
        t.go_prev();

        assert_eq!(*seen.borrow(), vec![1, 2, 3, 2]);
    }

    #[test]
    fn test_rubber_band_stays_inside_viewport() {
        let mut t = SwipeTracker::new(5).with_item_width(40.0);
        t.on_drag_start();
        t.on_drag_move(200.0);
        assert_eq!(t.display_offset(), 39.0);
        t.on_drag_cancel();

        t.go_to(4);
        t.on_drag_start();
        t.on_drag_move(-1000.0);
        assert_eq!(t.display_offset(), -39.0);
    }

    #[test]
    fn test_invalid_width_and_ratio_fallback() {
        let mut t = SwipeTracker::new(3).with_threshold_ratio(-1.0).with_item_width(80.0);
        t.set_item_width(0.0);
        t.set_item_width(f32::NAN);
        assert_eq!(t.item_width(), 80.0);
        assert_eq!(t.threshold(), 80.0 * DEFAULT_THRESHOLD_RATIO);
    }
}
