#![allow(dead_code)]

pub mod completion;
pub mod sink;
pub mod video_source;
