//! Camera-side half of the game: turns frames into a vertical position.
//!
//! Everything here runs on the tracking thread except [`Tunables`] and
//! [`TrackingChannel`], which are the only values shared with the game tick.

pub mod blob;
#[cfg(feature = "camera")]
pub mod camera;
pub mod channel;
pub mod frame;
pub mod pipeline;
pub mod segment;

pub use blob::{BlobTracker, Region};
pub use channel::TrackingChannel;
pub use frame::{CameraConfig, FrameSource};
pub use pipeline::{Pipeline, TrackerConfig, TrackerHandle};
pub use segment::{ChannelRange, Mask, Slider, Thresholds, Tunables, segment};
