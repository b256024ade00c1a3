use nalgebra::{Point3, Vector2};

use crate::hand::{HandSample, DIGIT_CHAINS, THUMB_TIP, WRIST};

/// Geometric metrics derived from one hand sample. Computed fresh per frame,
/// never carried across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct HandMetrics {
    /// Rough overall hand size, twice the wrist-to-thumb-tip palm length.
    pub hand_size: f32,
    /// Summed segment lengths per digit, thumb to pinky.
    pub finger_lengths: [f32; 5],
}

impl HandMetrics {
    /// Finger lengths as comma-joined text, the form the metrics table stores.
    pub fn finger_lengths_text(&self) -> String {
        self.finger_lengths
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

// Distances are taken in the image plane. The landmark model emits a depth
// coordinate, but it is relative to the wrist and not in pixel units, so it
// stays out of the metric.
fn planar_distance(a: &Point3<f32>, b: &Point3<f32>) -> f32 {
    Vector2::new(b.x - a.x, b.y - a.y).norm()
}

/// Computes hand size and per-digit finger lengths for one sample.
///
/// Hand size is approximated as twice the palm length (wrist to thumb tip).
/// Each finger length is the sum of planar distances between consecutive
/// keypoints of that digit's chain.
pub fn hand_metrics(sample: &HandSample) -> HandMetrics {
    let palm_length = planar_distance(&sample.keypoint(WRIST), &sample.keypoint(THUMB_TIP));
    let hand_size = 2.0 * palm_length;

    let mut finger_lengths = [0.0f32; 5];
    for (digit, chain) in DIGIT_CHAINS.iter().enumerate() {
        finger_lengths[digit] = chain_length(sample, chain);
    }

    HandMetrics {
        hand_size,
        finger_lengths,
    }
}

// A chain shorter than two keypoints has no segments and reports zero.
// Cannot happen with the fixed chains above.
fn chain_length(sample: &HandSample, chain: &[usize]) -> f32 {
    if chain.len() < 2 {
        return 0.0;
    }
    chain
        .windows(2)
        .map(|pair| planar_distance(&sample.keypoint(pair[0]), &sample.keypoint(pair[1])))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::Handedness;
    use nalgebra::Point3;
    use proptest::prelude::*;

    fn sample_from(points: [Point3<f32>; 21]) -> HandSample {
        HandSample::new(points, 1.0, Handedness::Right)
    }

    fn flat_sample(x: f32, y: f32) -> HandSample {
        sample_from([Point3::new(x, y, 0.0); 21])
    }

    #[test]
    fn coincident_wrist_and_thumb_tip_give_zero_hand_size() {
        let metrics = hand_metrics(&flat_sample(120.0, 80.0));
        assert_eq!(metrics.hand_size, 0.0);
    }

    #[test]
    fn hand_size_is_twice_the_palm_length() {
        let mut points = [Point3::new(0.0, 0.0, 0.0); 21];
        points[THUMB_TIP] = Point3::new(3.0, 4.0, 0.0);
        let metrics = hand_metrics(&sample_from(points));
        assert!((metrics.hand_size - 10.0).abs() < 1e-6);
    }

    #[test]
    fn depth_does_not_contribute_to_distances() {
        let mut points = [Point3::new(0.0, 0.0, 0.0); 21];
        points[THUMB_TIP] = Point3::new(3.0, 4.0, 100.0);
        let metrics = hand_metrics(&sample_from(points));
        assert!((metrics.hand_size - 10.0).abs() < 1e-6);
    }

    #[test]
    fn finger_length_sums_consecutive_segments() {
        let mut points = [Point3::new(0.0, 0.0, 0.0); 21];
        // index digit laid out along the x axis with unit segments
        points[5] = Point3::new(0.0, 0.0, 0.0);
        points[6] = Point3::new(1.0, 0.0, 0.0);
        points[7] = Point3::new(2.0, 0.0, 0.0);
        points[8] = Point3::new(3.0, 0.0, 0.0);
        let metrics = hand_metrics(&sample_from(points));
        assert!((metrics.finger_lengths[1] - 3.0).abs() < 1e-6);
    }

    #[test]
    fn coincident_digit_reports_zero_length() {
        let metrics = hand_metrics(&flat_sample(42.0, 42.0));
        assert_eq!(metrics.finger_lengths, [0.0; 5]);
    }

    #[test]
    fn finger_lengths_text_is_comma_joined() {
        let metrics = HandMetrics {
            hand_size: 1.0,
            finger_lengths: [1.0, 2.0, 3.0, 4.0, 5.0],
        };
        assert_eq!(metrics.finger_lengths_text(), "1,2,3,4,5");
    }

    proptest! {
        #[test]
        fn finger_lengths_are_never_negative(
            coords in proptest::collection::vec((0.0f32..2000.0, 0.0f32..2000.0), 21)
        ) {
            let mut points = [Point3::new(0.0, 0.0, 0.0); 21];
            for (i, (x, y)) in coords.into_iter().enumerate() {
                points[i] = Point3::new(x, y, 0.0);
            }
            let metrics = hand_metrics(&sample_from(points));
            prop_assert!(metrics.hand_size >= 0.0);
            for length in metrics.finger_lengths {
                prop_assert!(length >= 0.0);
            }
        }
    }
}
