//! 页面数据：加载状态机、占位内容和各页面的组装。

pub mod model;
pub mod pages;
pub mod sample;

pub use self::model::{ContentSource, Loadable, Shown};
