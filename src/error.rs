use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("camera {index} could not be opened: {reason}")]
    CameraOpen { index: u32, reason: String },

    #[error("camera frame read failed: {0}")]
    CameraRead(String),

    #[error("camera {0} is not open")]
    CameraClosed(u32),

    #[error("audio output unavailable: {0}")]
    AudioInit(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
