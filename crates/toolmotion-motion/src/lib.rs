//! # toolmotion motion
//!
//! Translates [`Path`](toolmotion_geometry::Path)s into machine commands.
//!
//! [`Motion`] is the state machine: it tracks the tool position, drops
//! commands that would not move the tool and decides when to retract,
//! plunge, interpolate a curve or hand an arc to the driver natively.
//! [`Driver`] is the seam to the device; [`RecordingDriver`] captures the
//! command stream in memory.
//!
//! ```rust
//! use toolmotion_geometry::SubPath;
//! use toolmotion_motion::{Command, Motion, Params, RecordingDriver};
//! use toolmotion_settings::MachineContext;
//!
//! let mut sub = SubPath::new();
//! sub.move_to(0.0, 0.0);
//! sub.line_to(10.0, 0.0);
//!
//! let mut driver = RecordingDriver::new();
//! Motion::new(&mut driver, MachineContext::default())
//!     .follow_path(&sub)
//!     .unwrap();
//! assert_eq!(driver.commands(), &[Command::Linear(Params::xy(10.0, 0.0))]);
//! ```

pub mod driver;
pub mod error;
pub mod filter;
pub mod motion;
pub mod params;
pub mod recorder;

pub use driver::Driver;
pub use error::{MotionError, MotionResult};
pub use filter::{FilterState, MotionFilter};
pub use motion::{Motion, CURVE_DIVISIONS};
pub use params::Params;
pub use recorder::{Command, RecordingDriver};
