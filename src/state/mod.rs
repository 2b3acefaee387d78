//! Application state module

mod app_state;
mod draft;
mod forms;
mod phone;
mod remote;
mod steps;
mod validation;

pub use app_state::*;
pub use draft::*;
pub use forms::*;
pub use remote::*;
pub use steps::*;
pub use validation::*;
