pub mod audio;
pub mod catalog;
pub mod clock;
pub mod engine;
pub mod playback;
pub mod rodio_backend;
pub mod session;
pub mod track;
pub mod transition;
pub mod weather;

pub use audio::*;
pub use catalog::*;
pub use clock::*;
pub use engine::*;
pub use playback::*;
pub use rodio_backend::*;
pub use session::*;
pub use track::*;
pub use transition::*;
pub use weather::*;
