pub mod image_dimensions;
pub mod input_source;
pub mod png_header;

// --- public re-exports ---
pub use image_dimensions::ImageDimensions;
pub use input_source::directory_path::DirectoryPath;
pub use png_header::HeaderProbe;
