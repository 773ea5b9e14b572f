pub mod captures;
pub mod movegen;

pub use captures::{
    capture_steps, find_all_captures, find_capture_sequences_from, has_capture_from, CaptureChain,
};
pub use movegen::legal_moves;
