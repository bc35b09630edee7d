mod macros;

pub mod animator;
pub mod arc;
pub mod config;
pub mod dial;
pub mod error;
pub mod geometry;
pub mod mapper;
pub mod protocol;
pub mod render;
pub mod ticks;

pub use animator::{Easing, Phase, TransitionAnimator};
pub use arc::ArcSpec;
pub use config::{DialConfig, RingMetrics};
pub use dial::{Dial, DialState, Frame, PointerAction};
pub use error::DialError;
pub use geometry::{Point, Rect, Size};
pub use mapper::ValueMapper;
pub use render::{DrawCommand, LabelStyle, TickStyle};
pub use ticks::{Endpoint, Tick, TickLayout};

pub const SOCKET_PATH: &str = "/tmp/degree.sock";
