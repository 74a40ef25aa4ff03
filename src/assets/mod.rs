/// Byte-level image decoding.
pub mod decode;
/// Image references: raw bytes, files and data URIs.
pub mod source;
