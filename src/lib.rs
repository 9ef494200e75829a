//! 教区信息终端：礼拜时间、讲道、见证、博客、诗班与联系方式。

pub mod config;
pub mod error;
pub mod links;
pub mod logging;
pub mod models;
pub mod player;
pub mod schedule;
pub mod storage;
pub mod swipe;
pub mod ui;
