pub mod upload;

pub use upload::upload_image;
