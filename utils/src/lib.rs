mod atlas;
mod color;
mod parse;
mod projection;
mod screen;

pub use atlas::{RectOffset, UvRect};
pub use color::Rgba;
pub use parse::ParseError;
pub use projection::CameraProjection;
pub use screen::{is_on_screen, rotation_from_up, SCREEN_LIMIT};
