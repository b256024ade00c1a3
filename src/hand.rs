use nalgebra::Point3;

use crate::error::{Error, Result};

// Landmark indices follow the MediaPipe hand landmark convention:
// 21 keypoints per hand, wrist first, then four keypoints per digit
// from the base of the thumb to the tip of the pinky.
pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

pub const KEYPOINT_COUNT: usize = 21;

/// The five fingertip keypoints, thumb to pinky.
pub const FINGERTIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// Per-digit keypoint chains, thumb to pinky. Each digit owns the four
/// keypoints from its base joint to its tip.
pub const DIGIT_CHAINS: [[usize; 4]; 5] = [
    [THUMB_CMC, THUMB_MCP, THUMB_IP, THUMB_TIP],
    [INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP],
    [MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP],
    [RING_MCP, RING_PIP, RING_DIP, RING_TIP],
    [PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP],
];

/// Hand skeleton connections for rendering.
pub const HAND_SKELETON: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC),
    (THUMB_CMC, THUMB_MCP),
    (THUMB_MCP, THUMB_IP),
    (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP),
    (INDEX_MCP, INDEX_PIP),
    (INDEX_PIP, INDEX_DIP),
    (INDEX_DIP, INDEX_TIP),
    (WRIST, MIDDLE_MCP),
    (MIDDLE_MCP, MIDDLE_PIP),
    (MIDDLE_PIP, MIDDLE_DIP),
    (MIDDLE_DIP, MIDDLE_TIP),
    (WRIST, RING_MCP),
    (RING_MCP, RING_PIP),
    (RING_PIP, RING_DIP),
    (RING_DIP, RING_TIP),
    (WRIST, PINKY_MCP),
    (PINKY_MCP, PINKY_PIP),
    (PINKY_PIP, PINKY_DIP),
    (PINKY_DIP, PINKY_TIP),
    (INDEX_MCP, MIDDLE_MCP),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Maps the model's handedness logit (after sigmoid) to a label.
    pub fn from_score(score: f32) -> Self {
        if score >= 0.5 {
            Handedness::Right
        } else {
            Handedness::Left
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Handedness::Left => "Left",
            Handedness::Right => "Right",
        }
    }
}

/// All 21 keypoints of one detected hand in one frame, in frame-pixel
/// coordinates. Index 0 is the wrist, 4 the thumb tip, 8/12/16/20 the
/// remaining fingertips. Well-formedness (exactly 21 keypoints, fixed
/// anatomical order) is guaranteed by construction; everything downstream
/// relies on it.
#[derive(Debug, Clone)]
pub struct HandSample {
    points: [Point3<f32>; 21],
    pub confidence: f32,
    pub handedness: Handedness,
}

impl HandSample {
    pub fn new(points: [Point3<f32>; 21], confidence: f32, handedness: Handedness) -> Self {
        Self {
            points,
            confidence,
            handedness,
        }
    }

    /// Builds a sample from a runtime-length keypoint list. Anything other
    /// than exactly 21 points is rejected outright rather than padded or
    /// truncated.
    pub fn from_points(
        points: Vec<Point3<f32>>,
        confidence: f32,
        handedness: Handedness,
    ) -> Result<Self> {
        let len = points.len();
        let points: [Point3<f32>; 21] = points
            .try_into()
            .map_err(|_| Error::MalformedSample(len))?;
        Ok(Self::new(points, confidence, handedness))
    }

    pub fn keypoint(&self, index: usize) -> Point3<f32> {
        self.points[index]
    }

    pub fn keypoints(&self) -> &[Point3<f32>; 21] {
        &self.points
    }
}
