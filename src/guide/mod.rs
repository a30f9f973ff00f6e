mod engine;
mod types;

pub use engine::{GuideEngine, GuideError, DEFAULT_GUIDE_TEMPLATE};
pub use types::GuideContext;
