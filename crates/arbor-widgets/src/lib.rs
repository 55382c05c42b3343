//! The standard widget set: containers, flex and stack layout, wrapping,
//! scrolling, text, images, gesture detection and composition.

mod composite;
mod container;
mod flex;
mod gesture;
mod image;
mod scroll;
mod stack;
mod text;
mod wrap;

pub use composite::Composite;
pub use container::Container;
pub use flex::{CrossAlign, Flex, Flexible, MainAlign};
pub use gesture::{FocusDecorator, GestureDetector};
pub use image::{BoxFit, Image};
pub use scroll::Scrollable;
pub use stack::{Positioned, Stack, StackFit};
pub use text::Text;
pub use wrap::Wrap;
