//! Webcam capture through nokhwa.

use super::frame::{CameraConfig, FrameSource};
use crate::error::{Error, Result};
use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
};

/// A webcam that is opened lazily and closed again on read failure or drop.
pub struct Camera {
    config: CameraConfig,
    cam: Option<nokhwa::Camera>,
}

impl Camera {
    pub fn new(config: CameraConfig) -> Self {
        Self { config, cam: None }
    }
}

impl FrameSource for Camera {
    fn open(&mut self) -> Result<()> {
        self.close();

        let format = CameraFormat::new(
            Resolution::new(self.config.width, self.config.height),
            FrameFormat::MJPEG,
            self.config.fps,
        );
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(format));

        let index = self.config.index;
        let open_err = move |e: nokhwa::NokhwaError| Error::CameraOpen {
            index,
            reason: e.to_string(),
        };
        let mut cam = nokhwa::Camera::new(CameraIndex::Index(index), requested).map_err(open_err)?;
        cam.open_stream().map_err(open_err)?;

        let actual = cam.camera_format();
        tracing::info!(
            "camera {} streaming {}x{} @ {}fps",
            self.config.index,
            actual.resolution().width(),
            actual.resolution().height(),
            actual.frame_rate()
        );
        self.cam = Some(cam);
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.cam.is_some()
    }

    fn read_frame(&mut self) -> Result<RgbImage> {
        let cam = self
            .cam
            .as_mut()
            .ok_or(Error::CameraClosed(self.config.index))?;

        let decoded = cam
            .frame()
            .and_then(|buf| buf.decode_image::<RgbFormat>())
            .map_err(|e| Error::CameraRead(e.to_string()));
        let decoded = match decoded {
            Ok(img) => img,
            Err(e) => {
                self.close();
                return Err(e);
            }
        };

        // nokhwa may be built against a different `image` release; go through raw bytes.
        let (w, h) = (decoded.width(), decoded.height());
        RgbImage::from_raw(w, h, decoded.into_raw())
            .ok_or_else(|| Error::CameraRead(format!("short frame buffer for {w}x{h}")))
    }

    fn close(&mut self) {
        if let Some(mut cam) = self.cam.take() {
            if let Err(e) = cam.stop_stream() {
                tracing::warn!("camera {} did not stop cleanly: {e}", self.config.index);
            }
            tracing::info!("camera {} closed", self.config.index);
        }
    }

    fn describe(&self) -> String {
        format!("camera {}", self.config.index)
    }
}

impl Drop for Camera {
    fn drop(&mut self) {
        self.close();
    }
}
