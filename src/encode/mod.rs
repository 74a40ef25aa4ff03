/// Sequence-to-animation assembly and the threaded encode job.
pub mod assembler;
/// Looping GIF output sink.
pub mod gif;
/// Frame sink contract and in-memory sink.
pub mod sink;
