//! 核心逻辑模块

pub mod dump;
pub mod params;
pub mod patch;
