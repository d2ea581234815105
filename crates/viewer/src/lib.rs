//! Interactive viewer for bounded single-variable minimization.
//!
//! The viewer builds an objective from a preset or a typed expression, runs a
//! minimizer over user-chosen bounds, records every objective evaluation and
//! every iteration, and lets the user step back and forth through the
//! evaluations drawn over the function curve.
//!
//! All behavior lives in the toolkit-free [`App`] state machine. The desktop
//! window in [`gui`] (feature `gui`) only maps widgets to [`Message`]s and
//! draws the [`Chart`](chart::Chart) that [`App::chart`] describes.
//!
//! ```
//! use optview::{App, FunctionChoice, Message, Method, Preset};
//!
//! let app = App::default()
//!     .update(Message::SelectFunction(FunctionChoice::Preset(Preset::Quadratic)))
//!     .update(Message::SelectMethod(Method::NelderMead))
//!     .update(Message::SetLower(-5.0))
//!     .update(Message::SetUpper(5.0))
//!     .update(Message::SetInitialPoint(3.0))
//!     .update(Message::Optimize);
//!
//! assert_eq!(app.hint(), "Optimization done");
//! assert!(app.counter().is_some_and(|n| n > 0));
//! ```

pub mod app;
pub mod bounded;
pub mod browser;
pub mod chart;
pub mod config;
pub mod error;
#[cfg(feature = "gui")]
pub mod gui;
pub mod method;
pub mod presets;
pub mod recorder;
pub mod settings;

pub use app::{App, Controls, FunctionChoice, Message, Session};
pub use browser::Browser;
pub use config::{RunConfig, StartPoint};
pub use error::{ConfigurationError, OptimizationError, RunError};
pub use method::{Method, MethodOption, MethodOptions, OptionKind};
pub use presets::Preset;
pub use recorder::{Outcome, Record, Recorder, Recording, run};
pub use settings::Settings;
