//! 诗班音频播放器状态
//!
//! 只维护播放/暂停/进度/静音状态，不做音频解码。

use std::time::Duration;

use crate::models::Track;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub track: Track,
    is_playing: bool,
    muted: bool,
    position: Duration,
    duration: Duration,
}

impl Player {
    pub fn new(track: Track) -> Self {
        let duration = Duration::from_secs(track.duration_secs);
        Self {
            track,
            is_playing: false,
            muted: false,
            position: Duration::ZERO,
            duration,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// 播放进度 [0, 1]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.position.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// 播放/暂停；在末尾播放时从头开始
    pub fn toggle_play(&mut self) {
        if self.is_playing {
            self.is_playing = false;
            return;
        }
        if self.duration.is_zero() {
            return;
        }
        if self.position >= self.duration {
            self.position = Duration::ZERO;
        }
        self.is_playing = true;
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// 推进播放位置，到达末尾自动停止
    pub fn tick(&mut self, elapsed: Duration) {
        if !self.is_playing {
            return;
        }
        self.position = self.position.saturating_add(elapsed);
        if self.position >= self.duration {
            self.position = self.duration;
            self.is_playing = false;
        }
    }

    /// 按比例跳转（点击进度条）
    pub fn seek_fraction(&mut self, fraction: f64) {
        if fraction.is_nan() {
            return;
        }
        let fraction = fraction.clamp(0.0, 1.0);
        self.position = self.duration.mul_f64(fraction);
    }

    /// 前进/后退若干秒，夹紧到 [0, duration]
    pub fn skip(&mut self, seconds: i64) {
        let step = Duration::from_secs(seconds.unsigned_abs());
        self.position = if seconds < 0 {
            self.position.saturating_sub(step)
        } else {
            self.position.saturating_add(step).min(self.duration)
        };
    }
}

/// 格式化为 `m:ss`
pub fn format_time(time: Duration) -> String {
    let secs = time.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
