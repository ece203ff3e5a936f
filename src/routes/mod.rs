pub mod landing;
pub mod upload;
