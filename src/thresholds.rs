//! Per-posture threshold tables
//!
//! Band edges, ideal angles and scale constants encode biomechanical
//! knowledge, so they are declared here by posture and indicator instead of
//! inline in the scoring code. Angles are in degrees, distances in normalized
//! frame units. Scales are points lost per unit of deviation.

/// Closed range of acceptable values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Score awarded for each tier of a stepped indicator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierScores {
    pub top: f64,
    pub middle: f64,
    pub bottom: f64,
}

/// Score floors for the excellent and good feedback bands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackBands {
    pub excellent: f64,
    pub good: f64,
}

/// Default scale for alignment checks: a 0.1 deviation costs all 100 points
pub const ALIGNMENT_SCALE: f64 = 1000.0;

/// Scale for lateral spread checks (hip opening): 0.5 of frame width earns 100
pub const SPREAD_SCALE: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DowndogThresholds {
    /// Hip angle between shoulders and ankles giving a clean inverted V
    pub hip_angle_ideal: Range,
    pub hip_angle_acceptable: Range,
    pub alignment_scores: TierScores,
    /// Elbow angle floors for straight and nearly straight arms
    pub arm_straight: f64,
    pub arm_nearly_straight: f64,
    pub shoulder_opening_scores: TierScores,
    /// Knee angle floors for straight and nearly straight legs
    pub leg_straight: f64,
    pub leg_nearly_straight: f64,
    pub leg_extension_scores: TierScores,
    pub symmetry_warning: f64,
    /// Points lost per unit of nose-to-shoulder height difference
    pub head_position_scale: f64,
    pub head_position_tip: f64,
}

pub const DOWNDOG: DowndogThresholds = DowndogThresholds {
    hip_angle_ideal: Range {
        min: 90.0,
        max: 120.0,
    },
    hip_angle_acceptable: Range {
        min: 80.0,
        max: 140.0,
    },
    alignment_scores: TierScores {
        top: 100.0,
        middle: 75.0,
        bottom: 50.0,
    },
    arm_straight: 160.0,
    arm_nearly_straight: 140.0,
    shoulder_opening_scores: TierScores {
        top: 100.0,
        middle: 75.0,
        bottom: 50.0,
    },
    leg_straight: 160.0,
    leg_nearly_straight: 140.0,
    // Bent knees are a normal beginner variant, so the floor stays at 60
    leg_extension_scores: TierScores {
        top: 100.0,
        middle: 75.0,
        bottom: 60.0,
    },
    symmetry_warning: 70.0,
    head_position_scale: 200.0,
    head_position_tip: 60.0,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlankThresholds {
    /// Points lost per unit of hip distance from the shoulder-ankle line
    pub alignment_scale: f64,
    pub alignment_bands: FeedbackBands,
    /// Knee-to-ankle height gap below which the knees are on the floor
    pub modified_knee_gap: f64,
    /// Ceiling for core strength in the knees-down variant
    pub modified_core_ceiling: f64,
    pub full_core_score: f64,
    pub symmetry_warning: f64,
    pub shoulder_position_scale: f64,
    pub shoulder_position_tip: f64,
}

pub const PLANK: PlankThresholds = PlankThresholds {
    alignment_scale: 300.0,
    alignment_bands: FeedbackBands {
        excellent: 85.0,
        good: 70.0,
    },
    modified_knee_gap: 0.05,
    modified_core_ceiling: 40.0,
    full_core_score: 100.0,
    symmetry_warning: 80.0,
    shoulder_position_scale: ALIGNMENT_SCALE,
    shoulder_position_tip: 70.0,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeThresholds {
    pub alignment_scale: f64,
    pub alignment_bands: FeedbackBands,
    /// Raised-ankle to standing-hip height gaps: thigh, then calf
    pub foot_on_thigh: f64,
    pub foot_on_calf: f64,
    pub foot_height_scores: TierScores,
    pub hip_opening_scale: f64,
    pub hip_opening_excellent: f64,
    pub hip_opening_tip: f64,
    pub shoulder_level_scale: f64,
    pub shoulder_level_warning: f64,
}

pub const TREE: TreeThresholds = TreeThresholds {
    alignment_scale: ALIGNMENT_SCALE,
    alignment_bands: FeedbackBands {
        excellent: 80.0,
        good: 65.0,
    },
    foot_on_thigh: 0.15,
    foot_on_calf: 0.25,
    foot_height_scores: TierScores {
        top: 100.0,
        middle: 75.0,
        bottom: 50.0,
    },
    hip_opening_scale: SPREAD_SCALE,
    hip_opening_excellent: 80.0,
    hip_opening_tip: 50.0,
    shoulder_level_scale: ALIGNMENT_SCALE,
    shoulder_level_warning: 70.0,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Warrior2Thresholds {
    pub arms_scale: f64,
    pub arms_bands: FeedbackBands,
    /// Mean elbow angle required on top of level arms for the excellent band
    pub arm_straight: f64,
    pub knee_ideal_angle: f64,
    /// Points lost per degree away from the ideal knee angle
    pub knee_flexion_scale: f64,
    pub knee_on_target: Range,
    /// Lower edge of the "slightly shallow side of deep" band
    pub knee_deep_floor: f64,
    pub knee_ankle_scale: f64,
    pub knee_ankle_warning: f64,
    pub hip_opening_scale: f64,
    pub hip_opening_excellent: f64,
    pub hip_opening_tip: f64,
    pub shoulder_level_scale: f64,
    pub shoulder_level_warning: f64,
}

pub const WARRIOR2: Warrior2Thresholds = Warrior2Thresholds {
    arms_scale: ALIGNMENT_SCALE,
    arms_bands: FeedbackBands {
        excellent: 85.0,
        good: 70.0,
    },
    arm_straight: 160.0,
    knee_ideal_angle: 90.0,
    knee_flexion_scale: 1.0,
    knee_on_target: Range {
        min: 85.0,
        max: 95.0,
    },
    knee_deep_floor: 75.0,
    knee_ankle_scale: ALIGNMENT_SCALE,
    knee_ankle_warning: 60.0,
    hip_opening_scale: SPREAD_SCALE,
    hip_opening_excellent: 80.0,
    hip_opening_tip: 60.0,
    shoulder_level_scale: ALIGNMENT_SCALE,
    shoulder_level_warning: 75.0,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoddessThresholds {
    /// Feet distance over hip width
    pub stance_wide: f64,
    pub stance_fair: f64,
    pub stance_scores: TierScores,
    pub knee_ideal_angle: f64,
    pub squat_depth_scale: f64,
    pub squat_on_target: Range,
    /// Mean knee angle above which the squat is too shallow
    pub squat_shallow: f64,
    pub knee_alignment_scale: f64,
    pub knee_alignment_warning: f64,
    pub back_scale: f64,
    pub back_bands: FeedbackBands,
    pub symmetry_warning: f64,
}

pub const GODDESS: GoddessThresholds = GoddessThresholds {
    stance_wide: 2.5,
    stance_fair: 2.0,
    stance_scores: TierScores {
        top: 100.0,
        middle: 80.0,
        bottom: 60.0,
    },
    knee_ideal_angle: 90.0,
    squat_depth_scale: 1.0,
    squat_on_target: Range {
        min: 85.0,
        max: 95.0,
    },
    squat_shallow: 120.0,
    knee_alignment_scale: 300.0,
    knee_alignment_warning: 70.0,
    back_scale: ALIGNMENT_SCALE,
    back_bands: FeedbackBands {
        excellent: 80.0,
        good: 65.0,
    },
    symmetry_warning: 75.0,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityThresholds {
    /// Points lost per unit of mean frame-to-frame displacement
    pub movement_scale: f64,
    pub bands: FeedbackBands,
}

pub const STABILITY: StabilityThresholds = StabilityThresholds {
    movement_scale: 500.0,
    bands: FeedbackBands {
        excellent: 80.0,
        good: 60.0,
    },
};
