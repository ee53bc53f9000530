pub mod direction;
pub mod timeframe;

pub use direction::*;
pub use timeframe::Timeframe;
