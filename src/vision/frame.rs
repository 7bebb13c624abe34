use crate::error::Result;
use image::RgbImage;

#[derive(Clone, Copy, Debug)]
pub struct CameraConfig {
    pub index: u32,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            width: 640,
            height: 480,
            fps: 30,
        }
    }
}

/// Anything that can hand the tracker RGB frames: a webcam, a file, a script.
///
/// The tracking thread calls `open` whenever `is_open` reports false, so an
/// implementation should drop back to closed after an unrecoverable read
/// error and let the next iteration reopen it.
pub trait FrameSource {
    fn open(&mut self) -> Result<()>;

    fn is_open(&self) -> bool;

    fn read_frame(&mut self) -> Result<RgbImage>;

    fn close(&mut self);

    /// Short human-readable name for logs.
    fn describe(&self) -> String;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn open(&mut self) -> Result<()> {
        (**self).open()
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn read_frame(&mut self) -> Result<RgbImage> {
        (**self).read_frame()
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
