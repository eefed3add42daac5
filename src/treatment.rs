use crate::models::{HairColor, SkinTone, TreatmentCalculation};
use crate::tables::{self, HairBucket, Matrix, SkinBucket};

/// Returned when the matrix has no cell for a bucket pair.
pub const DEFAULT_CALCULATION: TreatmentCalculation = plan(12, 8.33, 80);

const fn plan(sessions: u32, progress_per_session: f64, efficacy: u8) -> TreatmentCalculation {
    TreatmentCalculation {
        sessions,
        progress_per_session,
        efficacy,
    }
}

// Calibrated constants; lighter skin with darker hair needs fewer sessions.
static TREATMENT_MATRIX: &Matrix<SkinBucket, HairBucket, TreatmentCalculation> = &[
    (
        SkinBucket::Light,
        &[
            (HairBucket::Black, plan(8, 12.5, 95)),
            (HairBucket::DarkBrown, plan(10, 10.0, 90)),
            (HairBucket::MediumBrown, plan(12, 8.33, 85)),
            (HairBucket::LightBrown, plan(16, 6.25, 80)),
            (HairBucket::Blonde, plan(18, 5.56, 75)),
            (HairBucket::Red, plan(20, 5.0, 70)),
        ],
    ),
    (
        SkinBucket::MediumLight,
        &[
            (HairBucket::Black, plan(12, 8.33, 90)),
            (HairBucket::DarkBrown, plan(12, 8.33, 85)),
            (HairBucket::MediumBrown, plan(14, 7.1, 80)),
            (HairBucket::LightBrown, plan(16, 6.25, 75)),
            (HairBucket::Blonde, plan(18, 5.56, 70)),
            (HairBucket::Red, plan(20, 5.0, 65)),
        ],
    ),
    (
        SkinBucket::Medium,
        &[
            (HairBucket::Black, plan(14, 7.1, 85)),
            (HairBucket::DarkBrown, plan(14, 7.1, 80)),
            (HairBucket::MediumBrown, plan(16, 6.25, 75)),
            (HairBucket::LightBrown, plan(18, 5.56, 70)),
            (HairBucket::Blonde, plan(20, 5.0, 65)),
            (HairBucket::Red, plan(20, 5.0, 60)),
        ],
    ),
    (
        SkinBucket::Dark,
        &[
            (HairBucket::Black, plan(16, 6.25, 75)),
            (HairBucket::DarkBrown, plan(16, 6.25, 70)),
            (HairBucket::MediumBrown, plan(18, 5.56, 65)),
            (HairBucket::LightBrown, plan(18, 5.56, 60)),
            (HairBucket::Blonde, plan(20, 5.0, 55)),
            (HairBucket::Red, plan(20, 5.0, 50)),
        ],
    ),
    (
        SkinBucket::VeryDark,
        &[
            (HairBucket::Black, plan(20, 5.0, 20)),
            (HairBucket::DarkBrown, plan(20, 5.0, 20)),
            (HairBucket::MediumBrown, plan(20, 5.0, 15)),
            (HairBucket::LightBrown, plan(20, 5.0, 15)),
            (HairBucket::Blonde, plan(20, 5.0, 10)),
            (HairBucket::Red, plan(20, 5.0, 10)),
        ],
    ),
];

/// Session count, per-session progress and expected efficacy for a
/// classification. Total: unknown categories go through the bucket
/// fallbacks and a missing cell yields [`DEFAULT_CALCULATION`].
pub fn calculate(skin_tone: Option<SkinTone>, hair_color: Option<HairColor>) -> TreatmentCalculation {
    let skin = tables::skin_bucket(skin_tone);
    let hair = tables::hair_bucket(hair_color);
    tables::lookup(TREATMENT_MATRIX, skin, hair).unwrap_or(DEFAULT_CALCULATION)
}

/// Cumulative reduction after `completed_sessions`, capped at 100.
pub fn total_progress(completed_sessions: usize, progress_per_session: f64) -> f64 {
    (completed_sessions as f64 * progress_per_session).min(100.0)
}

/// Sessions still left in the plan, never below zero.
pub fn remaining_sessions(calculation: &TreatmentCalculation, completed_sessions: usize) -> u32 {
    let completed = u32::try_from(completed_sessions).unwrap_or(u32::MAX);
    calculation.sessions.saturating_sub(completed)
}
