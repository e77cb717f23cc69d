//! The four detectors. Each is a pure function of the snapshot, emits its
//! findings in a deterministic internal order, and never performs I/O.

pub mod chains;
pub mod coincidences;
pub mod duplicates;
pub mod overlaps;
