pub mod animator;
pub mod color;
pub mod constants;
pub mod error;
pub mod gesture;
pub mod session;
pub mod shapes;

pub use animator::*;
pub use color::*;
pub use constants::*;
pub use error::*;
pub use gesture::*;
pub use session::*;
pub use shapes::{sample, sample_into, sample_point, ShapeKind};
