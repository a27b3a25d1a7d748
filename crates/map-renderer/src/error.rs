use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to prepare output directory: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
