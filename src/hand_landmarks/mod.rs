pub mod model_mediapipe;

use image::DynamicImage;

use crate::error::Result;
use crate::hand::HandSample;

/// A hand landmark detection capability: given a frame, produce zero or
/// more 21-keypoint hand samples in frame-pixel coordinates.
///
/// Detection is entirely delegated to the implementing model; nothing in
/// this crate inspects the image itself.
pub trait HandLandmarksModel {
    fn run(&self, image: &DynamicImage) -> Result<Vec<HandSample>>;
}
