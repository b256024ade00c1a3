use image::{DynamicImage, Rgba};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut, draw_text_mut,
};
use rusttype::{Font, Scale};

use crate::action::ActionLabel;
use crate::hand::{HandSample, FINGERTIPS, HAND_SKELETON};
use crate::pose::PoseLabel;

// palm-region keypoints get a filled marker
const PALM_KEYPOINTS: [usize; 6] = [0, 1, 2, 3, 4, 5];
const PALM_MARKER_RADIUS: i32 = 15;

const PALM_MARKER: Rgba<u8> = Rgba([47, 47, 224, 255]);
const SKELETON: Rgba<u8> = Rgba([0, 255, 0, 255]);
const TEXT: Rgba<u8> = Rgba([255, 0, 255, 255]);

/// Draws the skeleton, fingertip rings and palm markers for one hand onto
/// the frame.
pub fn draw_hand(image: &mut DynamicImage, sample: &HandSample) {
    for (from, to) in HAND_SKELETON {
        let a = sample.keypoint(from);
        let b = sample.keypoint(to);
        draw_line_segment_mut(image, (a.x, a.y), (b.x, b.y), SKELETON);
    }

    for tip in FINGERTIPS {
        let p = sample.keypoint(tip);
        draw_hollow_circle_mut(image, (p.x as i32, p.y as i32), 5, SKELETON);
    }

    for idx in PALM_KEYPOINTS {
        let p = sample.keypoint(idx);
        draw_filled_circle_mut(
            image,
            (p.x as i32, p.y as i32),
            PALM_MARKER_RADIUS,
            PALM_MARKER,
        );
    }
}

/// Draws the frame-rate readout at the top-left corner of the frame.
pub fn draw_fps(image: &mut DynamicImage, font: &Font<'_>, fps: f32) {
    draw_text_mut(
        image,
        TEXT,
        10,
        70,
        Scale::uniform(40.0),
        font,
        &format!("{}", fps as i32),
    );
}

/// Draws the classification result under the frame-rate readout.
pub fn draw_caption(image: &mut DynamicImage, font: &Font<'_>, pose: PoseLabel, action: ActionLabel) {
    draw_text_mut(
        image,
        TEXT,
        10,
        120,
        Scale::uniform(28.0),
        font,
        &format!("{} / {}", pose, action),
    );
}

/// Loads an overlay font from disk. Text overlays are skipped when no font
/// is available.
pub fn load_font(path: &str) -> Option<Font<'static>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            log::warn!("could not read font {}: {} (text overlay disabled)", path, err);
            return None;
        }
    };
    let font = Font::try_from_vec(bytes);
    if font.is_none() {
        log::warn!("could not parse font {} (text overlay disabled)", path);
    }
    font
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::Handedness;
    use nalgebra::Point3;

    #[test]
    fn draw_hand_touches_the_palm_pixels() {
        let mut image = DynamicImage::new_rgb8(200, 200);
        let sample = HandSample::new(
            [Point3::new(100.0, 100.0, 0.0); 21],
            1.0,
            Handedness::Right,
        );
        draw_hand(&mut image, &sample);
        let pixel = image.to_rgb8().get_pixel(100, 100).0;
        assert_eq!(pixel, [47, 47, 224]);
    }

    #[test]
    fn draw_hand_stays_in_bounds_near_edges() {
        let mut image = DynamicImage::new_rgb8(64, 64);
        let sample = HandSample::new(
            [Point3::new(0.0, 0.0, 0.0); 21],
            1.0,
            Handedness::Left,
        );
        // must not panic with markers partially outside the frame
        draw_hand(&mut image, &sample);
    }
}
