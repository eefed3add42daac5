use std::fmt::Write;

use serde::Serialize;
use uuid::Uuid;

use crate::intensity;
use crate::models::{
    IntensityRecommendation, Preference, SessionStatus, TreatmentCalculation, WeeklyProgressPoint,
};
use crate::preference;
use crate::progress::{self, WeekGrouping};
use crate::store::TreatmentStore;
use crate::treatment;

#[derive(Debug, Clone, Serialize)]
pub struct TreatmentStatus {
    pub completed_sessions: usize,
    pub total_progress: f64,
    pub remaining_sessions: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub user_id: Uuid,
    pub preference: Preference,
    pub calculation: TreatmentCalculation,
    pub recommendation: IntensityRecommendation,
    pub status: TreatmentStatus,
    pub weekly_progress: Vec<WeeklyProgressPoint>,
}

/// Plan and advice for a classification, without any stored history.
#[derive(Debug, Clone, Serialize)]
pub struct PlanView {
    pub preference: Preference,
    pub calculation: TreatmentCalculation,
    pub recommendation: IntensityRecommendation,
}

impl PlanView {
    pub fn new(preference: Preference) -> Self {
        Self {
            preference,
            calculation: treatment::calculate(preference.skin_tone, preference.hair_color),
            recommendation: intensity::recommend(preference.skin_tone, preference.hair_color),
        }
    }
}

/// Reads preference and history concurrently, then derives every view.
/// Store failures degrade to the new-user view.
pub async fn load(store: &dyn TreatmentStore, user_id: Uuid, grouping: WeekGrouping) -> Dashboard {
    let (preference, history) = tokio::join!(
        preference::resolve(store, user_id),
        store.completed_sessions(user_id)
    );

    if preference.is_fallback() {
        tracing::debug!(%user_id, "dashboard using default preference");
    }
    let plan = PlanView::new(preference.into_inner());

    let completed_sessions = history
        .as_ref()
        .map(|sessions| {
            sessions
                .iter()
                .filter(|session| session.status == SessionStatus::Completed)
                .count()
        })
        .unwrap_or(0);
    let weekly_progress = progress::from_history(
        user_id,
        history,
        plan.calculation.progress_per_session,
        grouping,
    )
    .into_inner();

    let status = TreatmentStatus {
        completed_sessions,
        total_progress: treatment::total_progress(
            completed_sessions,
            plan.calculation.progress_per_session,
        ),
        remaining_sessions: treatment::remaining_sessions(&plan.calculation, completed_sessions),
    };

    Dashboard {
        user_id,
        preference: plan.preference,
        calculation: plan.calculation,
        recommendation: plan.recommendation,
        status,
        weekly_progress,
    }
}

pub fn write_plan(output: &mut String, plan: &PlanView) {
    let skin = plan
        .preference
        .skin_tone
        .map(|tone| tone.display_name())
        .unwrap_or("Não informado");
    let hair = plan
        .preference
        .hair_color
        .map(|color| color.display_name())
        .unwrap_or("Não informado");

    let _ = writeln!(output, "## Profile");
    let _ = writeln!(output, "- Skin tone: {}", skin);
    let _ = writeln!(output, "- Hair color: {}", hair);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Treatment Plan");
    let _ = writeln!(output, "- Sessions: {}", plan.calculation.sessions);
    let _ = writeln!(
        output,
        "- Progress per session: {:.2}%",
        plan.calculation.progress_per_session
    );
    let _ = writeln!(output, "- Expected efficacy: {}%", plan.calculation.efficacy);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Device Intensity");

    if plan.recommendation.is_recommended {
        let _ = writeln!(
            output,
            "- Start at {}, up to {}",
            plan.recommendation.initial_intensity, plan.recommendation.max_intensity
        );
    } else {
        let _ = writeln!(output, "- {}", plan.recommendation.initial_intensity);
    }
    let _ = writeln!(output, "- {}", plan.recommendation.observations);
}

pub fn build_report(dashboard: &Dashboard) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# IPL Treatment Report");
    let _ = writeln!(output, "Generated for user {}", dashboard.user_id);
    let _ = writeln!(output);

    let plan = PlanView {
        preference: dashboard.preference,
        calculation: dashboard.calculation,
        recommendation: dashboard.recommendation,
    };
    write_plan(&mut output, &plan);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Status");
    let _ = writeln!(
        output,
        "- Completed sessions: {}",
        dashboard.status.completed_sessions
    );
    let _ = writeln!(
        output,
        "- Total reduction: {:.1}%",
        dashboard.status.total_progress
    );
    let _ = writeln!(
        output,
        "- Remaining sessions: {}",
        dashboard.status.remaining_sessions
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Weekly Progress");
    for point in dashboard.weekly_progress.iter() {
        let _ = writeln!(output, "- {}: {}%", point.label, point.progress);
    }

    output
}
