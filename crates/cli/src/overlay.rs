//! Debug rendering of a pose result over its frame.

use image::{imageops, Rgb, RgbImage};

use posebridge_core::detection::domain::landmark_type::{LandmarkType, SKELETON_CONNECTIONS};
use posebridge_core::{LandmarkRecord, Orientation, PoseResult};

const BONE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const JOINT_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const JOINT_RADIUS: i64 = 3;
const CLIP_MARGIN: f64 = 2.0;

/// Turns the sensor image into display space and draws the skeleton on it.
pub fn render(
    sensor: &RgbImage,
    orientation: Orientation,
    mirrored: bool,
    result: &PoseResult,
) -> RgbImage {
    let mut canvas = match orientation {
        Orientation::Rotate0 => sensor.clone(),
        Orientation::Rotate90 => imageops::rotate90(sensor),
        Orientation::Rotate180 => imageops::rotate180(sensor),
        Orientation::Rotate270 => imageops::rotate270(sensor),
    };
    if mirrored {
        imageops::flip_horizontal_in_place(&mut canvas);
    }

    for &(from, to) in SKELETON_CONNECTIONS {
        if let (Some(a), Some(b)) = (find(result, from), find(result, to)) {
            draw_line(&mut canvas, (a.x, a.y), (b.x, b.y), BONE_COLOR);
        }
    }
    for record in result.iter() {
        let body_joint = LandmarkType::from_id(record.landmark_type)
            .map(LandmarkType::is_body_joint)
            .unwrap_or(false);
        if body_joint {
            draw_joint(&mut canvas, record.x, record.y, JOINT_COLOR);
        }
    }
    canvas
}

fn find(result: &PoseResult, landmark_type: LandmarkType) -> Option<&LandmarkRecord> {
    result.iter().find(|r| r.landmark_type == landmark_type.id())
}

fn put(canvas: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, color);
    }
}

fn draw_joint(canvas: &mut RgbImage, x: f64, y: f64, color: Rgb<u8>) {
    let reach = JOINT_RADIUS as f64;
    let (w, h) = (canvas.width() as f64, canvas.height() as f64);
    if !(-reach..=w + reach).contains(&x) || !(-reach..=h + reach).contains(&y) {
        return;
    }
    let (cx, cy) = (x.floor() as i64, y.floor() as i64);
    for dy in -JOINT_RADIUS..=JOINT_RADIUS {
        for dx in -JOINT_RADIUS..=JOINT_RADIUS {
            if dx * dx + dy * dy <= JOINT_RADIUS * JOINT_RADIUS {
                put(canvas, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Cuts the segment down to the part inside the canvas grown by
/// `CLIP_MARGIN` on every side (Liang-Barsky). `None` when nothing is left
/// or a coordinate isn't finite.
fn clip_segment(
    canvas: &RgbImage,
    (x0, y0): (f64, f64),
    (x1, y1): (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
        return None;
    }
    let (min_x, max_x) = (-CLIP_MARGIN, canvas.width() as f64 + CLIP_MARGIN);
    let (min_y, max_y) = (-CLIP_MARGIN, canvas.height() as f64 + CLIP_MARGIN);
    let (dx, dy) = (x1 - x0, y1 - y0);

    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in [(-dx, x0 - min_x), (dx, max_x - x0), (-dy, y0 - min_y), (dy, max_y - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else if p < 0.0 {
            t0 = t0.max(q / p);
        } else {
            t1 = t1.min(q / p);
        }
    }
    if t0 > t1 {
        return None;
    }
    Some(((x0 + t0 * dx, y0 + t0 * dy), (x0 + t1 * dx, y0 + t1 * dy)))
}

fn draw_line(canvas: &mut RgbImage, from: (f64, f64), to: (f64, f64), color: Rgb<u8>) {
    let Some(((x0, y0), (x1, y1))) = clip_segment(canvas, from, to) else {
        return;
    };
    // Bounded by the clipped extent, so at most a few canvas diagonals.
    let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as i64;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = x0 + (x1 - x0) * t;
        let y = y0 + (y1 - y0) * t;
        put(canvas, x.floor() as i64, y.floor() as i64, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(landmark_type: LandmarkType, x: f64, y: f64) -> LandmarkRecord {
        LandmarkRecord {
            timestamp: 0,
            landmark_type: landmark_type.id(),
            x,
            y,
            z: 0.0,
        }
    }

    #[test]
    fn test_canvas_is_display_sized() {
        let sensor = RgbImage::new(40, 30);
        let canvas = render(&sensor, Orientation::Rotate90, false, &PoseResult::empty());
        assert_eq!(canvas.dimensions(), (30, 40));
    }

    #[test]
    fn test_mirroring_flips_the_frame() {
        let mut sensor = RgbImage::new(4, 2);
        sensor.put_pixel(0, 0, Rgb([9, 9, 9]));
        let canvas = render(&sensor, Orientation::Rotate0, true, &PoseResult::empty());
        assert_eq!(canvas.get_pixel(3, 0), &Rgb([9, 9, 9]));
    }

    #[test]
    fn test_draws_bones_and_joints() {
        let sensor = RgbImage::new(50, 50);
        let result = PoseResult::from(vec![
            record(LandmarkType::LeftShoulder, 10.0, 10.0),
            record(LandmarkType::RightShoulder, 40.0, 10.0),
        ]);
        let canvas = render(&sensor, Orientation::Rotate0, false, &result);
        assert_eq!(canvas.get_pixel(25, 10), &BONE_COLOR);
        assert_eq!(canvas.get_pixel(10, 10), &JOINT_COLOR);
        assert_eq!(canvas.get_pixel(25, 30), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_face_landmarks_are_not_drawn() {
        let sensor = RgbImage::new(20, 20);
        let result = PoseResult::from(vec![record(LandmarkType::Nose, 10.0, 10.0)]);
        let canvas = render(&sensor, Orientation::Rotate0, false, &result);
        assert_eq!(canvas.get_pixel(10, 10), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_out_of_bounds_points_are_clipped() {
        let sensor = RgbImage::new(10, 10);
        let result = PoseResult::from(vec![
            record(LandmarkType::LeftHip, -50.0, 5.0),
            record(LandmarkType::RightHip, 500.0, 5.0),
        ]);
        let canvas = render(&sensor, Orientation::Rotate0, false, &result);
        assert_eq!(canvas.get_pixel(5, 5), &BONE_COLOR);
    }

    #[test]
    fn test_far_outlier_draws_only_the_visible_part() {
        let sensor = RgbImage::new(10, 10);
        let result = PoseResult::from(vec![
            record(LandmarkType::LeftHip, 2.0, 5.0),
            record(LandmarkType::RightHip, 1e12, 5.0),
        ]);
        let canvas = render(&sensor, Orientation::Rotate0, false, &result);
        assert_eq!(canvas.get_pixel(8, 5), &BONE_COLOR);
        assert_eq!(canvas.get_pixel(8, 8), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_segment_outside_canvas_is_skipped() {
        let sensor = RgbImage::new(10, 10);
        assert!(clip_segment(&sensor, (-1e9, -50.0), (1e9, -50.0)).is_none());
        assert!(clip_segment(&sensor, (f64::NAN, 1.0), (5.0, 5.0)).is_none());
        assert!(clip_segment(&sensor, (3.0, 3.0), (f64::INFINITY, 3.0)).is_none());
    }

    #[test]
    fn test_clipping_keeps_inner_segments_untouched() {
        let sensor = RgbImage::new(10, 10);
        assert_eq!(
            clip_segment(&sensor, (1.0, 2.0), (7.0, 9.0)),
            Some(((1.0, 2.0), (7.0, 9.0)))
        );
    }
}
