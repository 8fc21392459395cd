pub mod sequence;

pub use sequence::{
    CAMERA_HEIGHT_M, DEFAULT_SEQID, PanoRecord, Sequence, SequenceError,
};
