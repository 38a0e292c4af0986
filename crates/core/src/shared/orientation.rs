use serde::{Deserialize, Serialize};

/// Clockwise rotation that brings the sensor image upright.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    #[default]
    Rotate0,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Rotate0,
        Orientation::Rotate90,
        Orientation::Rotate180,
        Orientation::Rotate270,
    ];

    /// Snaps an arbitrary angle to the nearest quarter turn in `[0, 360)`.
    ///
    /// Ties round up, so 45 becomes 90 and -45 becomes 0.
    pub fn from_degrees(angle: i32) -> Self {
        let normalized = angle.rem_euclid(360);
        match ((normalized + 45) / 90) % 4 {
            0 => Orientation::Rotate0,
            1 => Orientation::Rotate90,
            2 => Orientation::Rotate180,
            _ => Orientation::Rotate270,
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Orientation::Rotate0 => 0,
            Orientation::Rotate90 => 90,
            Orientation::Rotate180 => 180,
            Orientation::Rotate270 => 270,
        }
    }

    /// True when the rotation swaps the width and height axes.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Orientation::Rotate90 | Orientation::Rotate270)
    }

    /// Extent of a `width x height` sensor image once rotated upright.
    pub fn display_extent(self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_axes() {
            (height, width)
        } else {
            (width, height)
        }
    }
}
