use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkinTone {
    Branco,
    Bege,
    CastanhoClaro,
    CastanhoMedio,
    CastanhoEscuro,
    CastanhoMuitoEscuro,
}

impl SkinTone {
    pub const ALL: [SkinTone; 6] = [
        SkinTone::Branco,
        SkinTone::Bege,
        SkinTone::CastanhoClaro,
        SkinTone::CastanhoMedio,
        SkinTone::CastanhoEscuro,
        SkinTone::CastanhoMuitoEscuro,
    ];

    /// Parses a stored category code. Unrecognised codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "branco" => Some(SkinTone::Branco),
            "bege" => Some(SkinTone::Bege),
            "castanho-claro" => Some(SkinTone::CastanhoClaro),
            "castanho-medio" => Some(SkinTone::CastanhoMedio),
            "castanho-escuro" => Some(SkinTone::CastanhoEscuro),
            "castanho-muito-escuro" => Some(SkinTone::CastanhoMuitoEscuro),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            SkinTone::Branco => "branco",
            SkinTone::Bege => "bege",
            SkinTone::CastanhoClaro => "castanho-claro",
            SkinTone::CastanhoMedio => "castanho-medio",
            SkinTone::CastanhoEscuro => "castanho-escuro",
            SkinTone::CastanhoMuitoEscuro => "castanho-muito-escuro",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SkinTone::Branco => "Muito Clara",
            SkinTone::Bege => "Clara",
            SkinTone::CastanhoClaro => "Média",
            SkinTone::CastanhoMedio => "Oliva",
            SkinTone::CastanhoEscuro => "Bronzeada",
            SkinTone::CastanhoMuitoEscuro => "Muito Escura",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HairColor {
    Preto,
    CastanhoEscuro,
    CastanhoMedio,
    CastanhoClaro,
    Loiro,
    Ruivo,
}

impl HairColor {
    pub const ALL: [HairColor; 6] = [
        HairColor::Preto,
        HairColor::CastanhoEscuro,
        HairColor::CastanhoMedio,
        HairColor::CastanhoClaro,
        HairColor::Loiro,
        HairColor::Ruivo,
    ];

    /// Parses a stored category code. Unrecognised codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "preto" => Some(HairColor::Preto),
            "castanho-escuro" => Some(HairColor::CastanhoEscuro),
            "castanho-medio" => Some(HairColor::CastanhoMedio),
            "castanho-claro" => Some(HairColor::CastanhoClaro),
            "loiro" => Some(HairColor::Loiro),
            "ruivo" => Some(HairColor::Ruivo),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            HairColor::Preto => "preto",
            HairColor::CastanhoEscuro => "castanho-escuro",
            HairColor::CastanhoMedio => "castanho-medio",
            HairColor::CastanhoClaro => "castanho-claro",
            HairColor::Loiro => "loiro",
            HairColor::Ruivo => "ruivo",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            HairColor::Preto => "Preto",
            HairColor::CastanhoEscuro => "Castanho Escuro",
            HairColor::CastanhoMedio => "Castanho Médio",
            HairColor::CastanhoClaro => "Castanho Claro",
            HairColor::Loiro => "Loiro",
            HairColor::Ruivo => "Ruivo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Completed,
    Other,
}

impl SessionStatus {
    pub fn from_code(code: &str) -> Self {
        if code.trim() == "completed" {
            SessionStatus::Completed
        } else {
            SessionStatus::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TreatmentCalculation {
    pub sessions: u32,
    pub progress_per_session: f64,
    /// Expected hair reduction, 0-100.
    pub efficacy: u8,
}

/// When `is_recommended` is false both intensity fields carry the
/// "not recommended" sentinel instead of a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntensityRecommendation {
    pub initial_intensity: &'static str,
    pub max_intensity: &'static str,
    pub observations: &'static str,
    pub is_recommended: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedSession {
    pub date: NaiveDate,
    pub status: SessionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyProgressPoint {
    pub label: String,
    pub progress: u8,
}

/// Raw preference row as stored; category codes are not validated.
#[derive(Debug, Clone)]
pub struct PreferenceRecord {
    pub skin_tone: String,
    pub hair_color: String,
    pub created_at: DateTime<Utc>,
}

/// Classification used by the calculators. `None` marks a stored code that
/// did not match any category; lookups apply their fallback bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preference {
    pub skin_tone: Option<SkinTone>,
    pub hair_color: Option<HairColor>,
}

impl Default for Preference {
    fn default() -> Self {
        Self {
            skin_tone: Some(SkinTone::Branco),
            hair_color: Some(HairColor::Preto),
        }
    }
}

impl From<&PreferenceRecord> for Preference {
    fn from(record: &PreferenceRecord) -> Self {
        Self {
            skin_tone: SkinTone::from_code(&record.skin_tone),
            hair_color: HairColor::from_code(&record.hair_color),
        }
    }
}

/// Outcome of a read that never fails: either data from the store or the
/// documented fallback for that read.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<T> {
    Fresh(T),
    Fallback(T),
}

impl<T> Resolved<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolved::Fallback(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Resolved::Fresh(value) | Resolved::Fallback(value) => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_parse_back_to_the_same_category() {
        for tone in SkinTone::ALL {
            assert_eq!(SkinTone::from_code(tone.code()), Some(tone));
        }
        for color in HairColor::ALL {
            assert_eq!(HairColor::from_code(color.code()), Some(color));
        }
    }

    #[test]
    fn unknown_codes_have_no_category() {
        assert_eq!(SkinTone::from_code("azul"), None);
        assert_eq!(SkinTone::from_code("Branco"), None);
        assert_eq!(HairColor::from_code(""), None);
        assert_eq!(HairColor::from_code(" loiro "), Some(HairColor::Loiro));
    }

    #[test]
    fn only_completed_status_counts_as_completed() {
        assert_eq!(SessionStatus::from_code("completed"), SessionStatus::Completed);
        assert_eq!(SessionStatus::from_code("scheduled"), SessionStatus::Other);
        assert_eq!(SessionStatus::from_code("COMPLETED"), SessionStatus::Other);
    }

    #[test]
    fn record_with_unknown_skin_keeps_known_hair() {
        let record = PreferenceRecord {
            skin_tone: "verde".to_string(),
            hair_color: "ruivo".to_string(),
            created_at: Utc::now(),
        };
        let preference = Preference::from(&record);
        assert_eq!(preference.skin_tone, None);
        assert_eq!(preference.hair_color, Some(HairColor::Ruivo));
    }

    #[test]
    fn resolved_exposes_its_origin() {
        let fresh = Resolved::Fresh(3);
        let fallback = Resolved::Fallback(0);
        assert!(!fresh.is_fallback());
        assert!(fallback.is_fallback());
        assert_eq!(fresh.into_inner(), 3);
        assert_eq!(fallback.into_inner(), 0);
    }

    #[test]
    fn categories_serialize_as_codes() {
        let json = serde_json::to_string(&SkinTone::CastanhoMuitoEscuro).unwrap();
        assert_eq!(json, "\"castanho-muito-escuro\"");
        let json = serde_json::to_string(&Preference::default()).unwrap();
        assert_eq!(json, r#"{"skin_tone":"branco","hair_color":"preto"}"#);
    }
}
