use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write image: {0}")]
    ImageWrite(#[from] image::ImageError),
}
