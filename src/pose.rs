use std::fmt;

use crate::hand::{HandSample, FINGERTIPS};

/// Counts fingertips that read as "up".
///
/// A fingertip counts as up when its vertical pixel coordinate is
/// numerically less than its horizontal one. Note that this compares raw
/// pixel coordinates, so the result depends on hand orientation and frame
/// geometry rather than on actual finger extension.
pub fn finger_count(sample: &HandSample) -> u8 {
    FINGERTIPS
        .iter()
        .filter(|&&tip| {
            let p = sample.keypoint(tip);
            p.y < p.x
        })
        .count() as u8
}

/// The fixed set of recognized hand poses, classified from the finger count
/// alone. No state, no history across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseLabel {
    ClosedFist,
    OneFinger,
    TwoFingers,
    ThreeFingers,
    FourFingers,
    FiveFingers,
    Unknown,
}

impl PoseLabel {
    /// Total mapping from a finger count to a pose label.
    pub fn from_finger_count(count: u8) -> Self {
        match count {
            0 => PoseLabel::ClosedFist,
            1 => PoseLabel::OneFinger,
            2 => PoseLabel::TwoFingers,
            3 => PoseLabel::ThreeFingers,
            4 => PoseLabel::FourFingers,
            5 => PoseLabel::FiveFingers,
            _ => PoseLabel::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PoseLabel::ClosedFist => "Closed Fist",
            PoseLabel::OneFinger => "One Finger",
            PoseLabel::TwoFingers => "Two Fingers",
            PoseLabel::ThreeFingers => "Three Fingers",
            PoseLabel::FourFingers => "Four Fingers",
            PoseLabel::FiveFingers => "Five Fingers",
            PoseLabel::Unknown => "Unknown Pose",
        }
    }
}

impl fmt::Display for PoseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classifies the pose of one hand sample.
pub fn classify_pose(sample: &HandSample) -> PoseLabel {
    PoseLabel::from_finger_count(finger_count(sample))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::{HandSample, Handedness};
    use nalgebra::Point3;
    use proptest::prelude::*;

    fn sample_from(points: [Point3<f32>; 21]) -> HandSample {
        HandSample::new(points, 1.0, Handedness::Right)
    }

    #[test]
    fn pose_mapping_is_exhaustive() {
        assert_eq!(PoseLabel::from_finger_count(0), PoseLabel::ClosedFist);
        assert_eq!(PoseLabel::from_finger_count(1), PoseLabel::OneFinger);
        assert_eq!(PoseLabel::from_finger_count(2), PoseLabel::TwoFingers);
        assert_eq!(PoseLabel::from_finger_count(3), PoseLabel::ThreeFingers);
        assert_eq!(PoseLabel::from_finger_count(4), PoseLabel::FourFingers);
        assert_eq!(PoseLabel::from_finger_count(5), PoseLabel::FiveFingers);
        assert_eq!(PoseLabel::from_finger_count(6), PoseLabel::Unknown);
    }

    #[test]
    fn pose_names_match_the_recognized_set() {
        assert_eq!(PoseLabel::ClosedFist.name(), "Closed Fist");
        assert_eq!(PoseLabel::Unknown.name(), "Unknown Pose");
    }

    #[test]
    fn all_tips_below_the_diagonal_count_as_closed_fist() {
        // every fingertip has y >= x, so nothing reads as up
        let points = [Point3::new(50.0, 300.0, 0.0); 21];
        let sample = sample_from(points);
        assert_eq!(finger_count(&sample), 0);
        assert_eq!(classify_pose(&sample), PoseLabel::ClosedFist);
    }

    #[test]
    fn tips_above_the_diagonal_are_counted() {
        let mut points = [Point3::new(50.0, 300.0, 0.0); 21];
        // raise index and middle tips above the y = x diagonal
        points[8] = Point3::new(400.0, 100.0, 0.0);
        points[12] = Point3::new(420.0, 90.0, 0.0);
        let sample = sample_from(points);
        assert_eq!(finger_count(&sample), 2);
        assert_eq!(classify_pose(&sample), PoseLabel::TwoFingers);
    }

    proptest! {
        #[test]
        fn finger_count_stays_in_range(
            coords in proptest::collection::vec((0.0f32..2000.0, 0.0f32..2000.0), 21)
        ) {
            let mut points = [Point3::new(0.0, 0.0, 0.0); 21];
            for (i, (x, y)) in coords.into_iter().enumerate() {
                points[i] = Point3::new(x, y, 0.0);
            }
            let count = finger_count(&sample_from(points));
            prop_assert!(count <= 5);
        }

        #[test]
        fn classification_is_total(count in 0u8..=255) {
            // any count resolves to one of the seven labels
            let _ = PoseLabel::from_finger_count(count).name();
        }
    }
}
