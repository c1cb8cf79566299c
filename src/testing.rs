//! Synthetic landmark frames shared by the unit tests

use crate::types::{Landmark, LandmarkIndex as L, Pose, Skeleton, LANDMARK_COUNT};
use rand::rngs::StdRng;
use rand::Rng;

const VISIBILITY: f64 = 0.95;

/// Left/right counterparts for mirroring a frame
const PAIRS: [(L, L); 16] = [
    (L::LeftEyeInner, L::RightEyeInner),
    (L::LeftEye, L::RightEye),
    (L::LeftEyeOuter, L::RightEyeOuter),
    (L::LeftEar, L::RightEar),
    (L::MouthLeft, L::MouthRight),
    (L::LeftShoulder, L::RightShoulder),
    (L::LeftElbow, L::RightElbow),
    (L::LeftWrist, L::RightWrist),
    (L::LeftPinky, L::RightPinky),
    (L::LeftIndex, L::RightIndex),
    (L::LeftThumb, L::RightThumb),
    (L::LeftHip, L::RightHip),
    (L::LeftKnee, L::RightKnee),
    (L::LeftAnkle, L::RightAnkle),
    (L::LeftHeel, L::RightHeel),
    (L::LeftFootIndex, L::RightFootIndex),
];

/// Builder for 33-landmark frames in image coordinates (y grows downwards)
#[derive(Debug, Clone)]
pub(crate) struct SkeletonBuilder {
    rows: [[f64; 4]; LANDMARK_COUNT],
}

impl SkeletonBuilder {
    /// Front view, standing upright with arms down
    pub(crate) fn standing() -> Self {
        Self::collapsed()
            .at(L::Nose, 0.5, 0.15)
            .pair(L::LeftEyeInner, L::RightEyeInner, 0.51, 0.13)
            .pair(L::LeftEye, L::RightEye, 0.52, 0.13)
            .pair(L::LeftEyeOuter, L::RightEyeOuter, 0.53, 0.13)
            .pair(L::LeftEar, L::RightEar, 0.55, 0.14)
            .pair(L::MouthLeft, L::MouthRight, 0.52, 0.18)
            .pair(L::LeftShoulder, L::RightShoulder, 0.6, 0.3)
            .pair(L::LeftElbow, L::RightElbow, 0.62, 0.45)
            .pair(L::LeftWrist, L::RightWrist, 0.63, 0.58)
            .pair(L::LeftPinky, L::RightPinky, 0.64, 0.62)
            .pair(L::LeftIndex, L::RightIndex, 0.635, 0.63)
            .pair(L::LeftThumb, L::RightThumb, 0.62, 0.61)
            .pair(L::LeftHip, L::RightHip, 0.56, 0.6)
            .pair(L::LeftKnee, L::RightKnee, 0.56, 0.75)
            .pair(L::LeftAnkle, L::RightAnkle, 0.56, 0.9)
            .pair(L::LeftHeel, L::RightHeel, 0.56, 0.92)
            .pair(L::LeftFootIndex, L::RightFootIndex, 0.57, 0.95)
    }

    /// Side view, straight plank on the toes
    pub(crate) fn plank() -> Self {
        Self::standing()
            .at(L::Nose, 0.12, 0.38)
            .side(L::LeftShoulder, L::RightShoulder, 0.2, 0.4)
            .side(L::LeftElbow, L::RightElbow, 0.2, 0.55)
            .side(L::LeftWrist, L::RightWrist, 0.2, 0.7)
            .side(L::LeftHip, L::RightHip, 0.5, 0.55)
            .side(L::LeftKnee, L::RightKnee, 0.65, 0.625)
            .side(L::LeftAnkle, L::RightAnkle, 0.8, 0.7)
            .side(L::LeftHeel, L::RightHeel, 0.82, 0.7)
            .side(L::LeftFootIndex, L::RightFootIndex, 0.78, 0.72)
    }

    /// Side view, straight back with the knees resting on the floor
    pub(crate) fn modified_plank() -> Self {
        Self::plank()
            .side(L::LeftShoulder, L::RightShoulder, 0.2, 0.45)
            .side(L::LeftElbow, L::RightElbow, 0.2, 0.575)
            .side(L::LeftHip, L::RightHip, 0.5, 0.575)
            .side(L::LeftKnee, L::RightKnee, 0.6, 0.68)
    }

    /// Side view, inverted V with straight arms and legs
    pub(crate) fn downdog() -> Self {
        Self::standing()
            .at(L::Nose, 0.12, 0.37)
            .side(L::LeftShoulder, L::RightShoulder, 0.112, 0.347)
            .side(L::LeftElbow, L::RightElbow, 0.081, 0.5485)
            .side(L::LeftWrist, L::RightWrist, 0.05, 0.75)
            .side(L::LeftHip, L::RightHip, 0.5, 0.25)
            .side(L::LeftKnee, L::RightKnee, 0.62, 0.52)
            .side(L::LeftAnkle, L::RightAnkle, 0.74, 0.79)
    }

    /// Front view, standing on the right leg with the left foot on the thigh
    pub(crate) fn tree() -> Self {
        Self::standing()
            .at(L::LeftKnee, 0.85, 0.72)
            .at(L::LeftAnkle, 0.47, 0.68)
    }

    /// Front view, left knee bent to 90° over the ankle, arms level
    pub(crate) fn warrior2() -> Self {
        Self::standing()
            .pair(L::LeftShoulder, L::RightShoulder, 0.56, 0.3)
            .pair(L::LeftElbow, L::RightElbow, 0.7, 0.3)
            .pair(L::LeftWrist, L::RightWrist, 0.84, 0.3)
            .pair(L::LeftHip, L::RightHip, 0.55, 0.55)
            .at(L::LeftKnee, 0.75, 0.55)
            .at(L::LeftAnkle, 0.75, 0.8)
            .at(L::RightKnee, 0.32, 0.68)
            .at(L::RightAnkle, 0.19, 0.81)
    }

    /// Front view, wide squat with thighs parallel to the floor
    pub(crate) fn goddess() -> Self {
        Self::standing()
            .pair(L::LeftHip, L::RightHip, 0.56, 0.55)
            .pair(L::LeftKnee, L::RightKnee, 0.72, 0.55)
            .pair(L::LeftAnkle, L::RightAnkle, 0.72, 0.85)
    }

    /// Well-executed instance of `pose`
    pub(crate) fn for_pose(pose: Pose) -> Self {
        match pose {
            Pose::Downdog => Self::downdog(),
            Pose::Plank => Self::plank(),
            Pose::Tree => Self::tree(),
            Pose::Warrior2 => Self::warrior2(),
            Pose::Goddess => Self::goddess(),
        }
    }

    /// Every landmark on the same point
    pub(crate) fn collapsed() -> Self {
        Self {
            rows: [[0.5, 0.5, 0.0, VISIBILITY]; LANDMARK_COUNT],
        }
    }

    /// Move a landmark in the image plane, keeping its depth
    pub(crate) fn at(mut self, landmark: L, x: f64, y: f64) -> Self {
        let row = &mut self.rows[landmark.index()];
        row[0] = x;
        row[1] = y;
        self
    }

    pub(crate) fn visibility(mut self, landmark: L, visibility: f64) -> Self {
        self.rows[landmark.index()][3] = visibility;
        self
    }

    /// Shift every landmark by the same offset
    pub(crate) fn shifted(mut self, dx: f64, dy: f64) -> Self {
        for row in &mut self.rows {
            row[0] += dx;
            row[1] += dy;
        }
        self
    }

    /// Flip the frame horizontally, swapping left and right landmarks
    pub(crate) fn mirrored(self) -> Self {
        let mut rows = self.rows;
        for row in &mut rows {
            row[0] = 1.0 - row[0];
        }
        for (left, right) in PAIRS {
            rows.swap(left.index(), right.index());
        }
        Self { rows }
    }

    pub(crate) fn rows(&self) -> Vec<[f64; 4]> {
        self.rows.to_vec()
    }

    pub(crate) fn landmarks(&self) -> Vec<Landmark> {
        self.rows
            .iter()
            .map(|[x, y, z, v]| Landmark::new(*x, *y, *z, *v))
            .collect()
    }

    pub(crate) fn build(&self) -> Skeleton {
        Skeleton::from_rows(&self.rows).expect("fixture frames are well formed")
    }

    /// Mirror-symmetric pair in a front view: left at `x`, right at `1 - x`
    fn pair(self, left: L, right: L, x: f64, y: f64) -> Self {
        self.at(left, x, y).at(right, 1.0 - x, y)
    }

    /// Pair seen from the side: same image position, split in depth
    fn side(mut self, left: L, right: L, x: f64, y: f64) -> Self {
        self.rows[left.index()] = [x, y, -0.05, self.rows[left.index()][3]];
        self.rows[right.index()] = [x, y, 0.05, self.rows[right.index()][3]];
        self
    }
}

/// Arbitrary but valid frame: positions in [0, 1), depth in [-0.3, 0.3)
pub(crate) fn random_skeleton(rng: &mut StdRng) -> Skeleton {
    let rows: Vec<[f64; 4]> = (0..LANDMARK_COUNT)
        .map(|_| {
            [
                rng.gen::<f64>(),
                rng.gen::<f64>(),
                rng.gen_range(-0.3..0.3),
                rng.gen::<f64>(),
            ]
        })
        .collect();
    Skeleton::from_rows(&rows).expect("generated frames are well formed")
}
