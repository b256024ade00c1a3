use std::ops::Deref;
use std::path::Path;

use image::DynamicImage;
use nalgebra::Point3;
use ndarray::{Array, CowArray};
use ort::tensor::OrtOwnedTensor;
use ort::{Environment, ExecutionProvider, GraphOptimizationLevel, Session, SessionBuilder, Value};
use rayon::prelude::*;

use crate::error::Result;
use crate::hand::{HandSample, Handedness, KEYPOINT_COUNT};
use crate::hand_landmarks::HandLandmarksModel;

// Model input is a square RGB tensor; landmark coordinates come back in
// input-pixel units and are rescaled to the frame.
const INPUT_SIZE: u32 = 224;

// Frames whose presence score falls below this yield no samples.
const PRESENCE_THRESHOLD: f32 = 0.5;

/// ONNX port of the MediaPipe hand landmark model.
///
/// Expects the exported single-hand graph: input `(1, 224, 224, 3)` f32 in
/// [0, 1], outputs `(1, 63)` landmark coordinates, a hand presence logit
/// and a handedness logit.
pub struct MediapipeHandLandmarksModel {
    session: Session,
}

impl MediapipeHandLandmarksModel {
    /// Loads the model from an ONNX file. The model binary is not bundled
    /// with the crate; point `HANDTRACK_MODEL` at an exported copy.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let environment = Environment::builder()
            .with_name("handtracking")
            .with_execution_providers([ExecutionProvider::CPU(Default::default())])
            .build()?
            .into_arc();

        let session = SessionBuilder::new(&environment)?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(2)?
            .with_model_from_file(path)?;

        Ok(Self { session })
    }

    fn preprocess(&self, image: &DynamicImage) -> Vec<f32> {
        let input = image
            .resize_exact(INPUT_SIZE, INPUT_SIZE, image::imageops::FilterType::Nearest)
            .to_rgb8();

        // normalize to [0, 1]
        input
            .as_raw()
            .par_iter()
            .map(|&v| v as f32 / 255.0)
            .collect()
    }
}

impl HandLandmarksModel for MediapipeHandLandmarksModel {
    fn run(&self, image: &DynamicImage) -> Result<Vec<HandSample>> {
        let pixels = self.preprocess(image);

        let array: CowArray<_, _> = Array::from_shape_vec(
            (1, INPUT_SIZE as usize, INPUT_SIZE as usize, 3),
            pixels,
        )
        .expect("input tensor shape matches the preprocessed buffer")
        .into_dyn()
        .into();

        let inputs = vec![Value::from_array(self.session.allocator(), &array)?];
        let outputs: Vec<Value> = self.session.run(inputs)?;

        let presence: OrtOwnedTensor<f32, _> = outputs[1].try_extract()?;
        let presence = sigmoid(presence.view().deref().iter().copied().next().unwrap_or(0.0));

        if presence < PRESENCE_THRESHOLD {
            log::debug!("no hand in frame (presence {:.3})", presence);
            return Ok(Vec::new());
        }

        let handedness: OrtOwnedTensor<f32, _> = outputs[2].try_extract()?;
        let handedness =
            sigmoid(handedness.view().deref().iter().copied().next().unwrap_or(0.5));

        let landmarks: OrtOwnedTensor<f32, _> = outputs[0].try_extract()?;
        let coords: Vec<f32> = landmarks.view().deref().iter().copied().collect();

        // rescale from input-tensor pixels to frame pixels
        let x_scale = image.width() as f32 / INPUT_SIZE as f32;
        let y_scale = image.height() as f32 / INPUT_SIZE as f32;

        let mut points = Vec::with_capacity(KEYPOINT_COUNT);
        for chunk in coords.chunks_exact(3).take(KEYPOINT_COUNT) {
            points.push(Point3::new(
                chunk[0] * x_scale,
                chunk[1] * y_scale,
                chunk[2] * x_scale,
            ));
        }

        let sample = HandSample::from_points(points, presence, Handedness::from_score(handedness))?;

        Ok(vec![sample])
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
