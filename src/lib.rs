pub mod core;
pub mod engine;

pub use self::core::candidate::{Candidate, CandidateShape};
pub use self::core::config::{AttrOverrides, EngineConfig, EngineOptions};
pub use self::core::error::ConfigError;
pub use self::core::matcher::Matcher;
pub use self::core::ranker::Ranker;
pub use self::core::render::{MarkedLabel, RenderedItem, Renderer};
pub use self::core::source::{CandidateStore, ListResolver, ListSource, NoLists, StaticLists};
pub use self::engine::Engine;
pub use self::engine::hooks::{Commit, SelectDecision, SelectNotice};
pub use self::engine::input::{KeyCode, KeyEvent};
pub use self::engine::surface::{BufferSurface, TextSurface};
