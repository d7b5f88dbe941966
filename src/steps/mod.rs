//! Step state machine.
//!
//! - [`StepStatus`] - lifecycle of one step
//! - [`StepRegistry`] - the ordered step list and its transitions
//! - [`RunSnapshot`] - immutable view handed to the renderer
//!
//! # Example
//!
//! ```
//! use earscope::steps::{StepDef, StepRegistry, StepStatus};
//!
//! let mut registry = StepRegistry::new([
//!     StepDef::new("check", "Check environment"),
//!     StepDef::new("extract", "Extract archives"),
//! ]);
//!
//! registry.set_active("check", Some("Windows"));
//! registry.complete("check", Some("OK"));
//! registry.skip("extract", Some("No archives"));
//!
//! assert_eq!(registry.get("check").unwrap().status, StepStatus::Done);
//! assert_eq!(registry.completed_count(), 2);
//! ```

pub mod registry;
pub mod snapshot;
pub mod status;

pub use registry::{Step, StepDef, StepRegistry};
pub use snapshot::{Progress, RunSnapshot};
pub use status::StepStatus;
