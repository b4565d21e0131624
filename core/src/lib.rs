#![no_std]

extern crate alloc;

pub use answer::*;
pub use card::*;
pub use catalog::*;
pub use error::*;
pub use hint::*;
pub use journal::*;
pub use player::*;
pub use progress::*;
pub use scheduler::*;
pub use session::*;
pub use stopwatch::*;
pub use view::*;
pub use widget::*;

pub mod codec;

mod answer;
mod card;
mod catalog;
mod error;
mod hint;
mod journal;
mod player;
mod progress;
mod scheduler;
mod session;
mod stopwatch;
mod view;
mod widget;
