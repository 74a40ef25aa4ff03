/// Sprite-sheet slicing into ordered frame sequences.
pub mod slicer;
