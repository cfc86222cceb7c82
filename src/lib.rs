pub use crate::args::TestArguments;
pub use crate::comparator::{Comparator, ProcessHandle};
pub use crate::errors::HarnessError;
pub use crate::failure::TestFailure;
pub use crate::writer::{ResultWriter, WrittenFiles};

pub mod args;
pub mod comparator;
pub mod diff;
pub mod errors;
pub mod failure;
pub mod paths;
pub mod report;
pub mod wdiff;
pub mod writer;
