//! Algorithm step recording: the replayable trace every algorithm emits.

pub mod cursor;
pub mod recorder;
pub mod step;

pub use cursor::StepCursor;
pub use recorder::{StepDraft, StepRecorder};
pub use step::{Auxiliary, Disposition, Step, StepSequence};
