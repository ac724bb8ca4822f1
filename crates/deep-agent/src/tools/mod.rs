//! The built-in tools that models can use.

mod time;
mod weather;

pub use time::GetCurrentTimeTool;
pub use weather::GetWeatherTool;
