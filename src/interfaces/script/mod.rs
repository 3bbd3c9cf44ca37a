//! JSON-lines session scripts: a recorded sequence of host commands and
//! completion events, replayed through the bridge, with responses written
//! back as JSON lines.

pub mod response_writer;
pub mod step_reader;
