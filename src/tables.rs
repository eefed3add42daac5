//! Classification tables mapping raw categories onto the buckets the
//! treatment and intensity matrices are keyed by.

use serde::Serialize;

use crate::models::{HairColor, SkinTone};

/// Coarse skin bucket used by the treatment matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkinBucket {
    Light,
    MediumLight,
    Medium,
    Dark,
    VeryDark,
}

/// Fitzpatrick-like bucket used by the intensity matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FitzpatrickBucket {
    #[serde(rename = "I-II")]
    OneTwo,
    #[serde(rename = "III")]
    Three,
    #[serde(rename = "IV")]
    Four,
    #[serde(rename = "V")]
    Five,
    #[serde(rename = "VI")]
    Six,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HairBucket {
    Black,
    DarkBrown,
    MediumBrown,
    LightBrown,
    Blonde,
    Red,
}

/// Two-level keyed table: row key, then column key.
pub type Matrix<R, C, V> = [(R, &'static [(C, V)])];

pub fn skin_bucket(skin_tone: Option<SkinTone>) -> SkinBucket {
    match skin_tone {
        Some(SkinTone::Branco) | Some(SkinTone::Bege) => SkinBucket::Light,
        Some(SkinTone::CastanhoClaro) => SkinBucket::MediumLight,
        Some(SkinTone::CastanhoMedio) => SkinBucket::Medium,
        Some(SkinTone::CastanhoEscuro) => SkinBucket::Dark,
        Some(SkinTone::CastanhoMuitoEscuro) => SkinBucket::VeryDark,
        None => SkinBucket::Medium,
    }
}

pub fn fitzpatrick_bucket(skin_tone: Option<SkinTone>) -> FitzpatrickBucket {
    match skin_tone {
        Some(SkinTone::Branco) => FitzpatrickBucket::OneTwo,
        Some(SkinTone::Bege) => FitzpatrickBucket::Three,
        Some(SkinTone::CastanhoClaro) => FitzpatrickBucket::Four,
        Some(SkinTone::CastanhoMedio) => FitzpatrickBucket::Five,
        Some(SkinTone::CastanhoEscuro) | Some(SkinTone::CastanhoMuitoEscuro) => {
            FitzpatrickBucket::Six
        }
        None => FitzpatrickBucket::Three,
    }
}

pub fn hair_bucket(hair_color: Option<HairColor>) -> HairBucket {
    match hair_color {
        Some(HairColor::Preto) => HairBucket::Black,
        Some(HairColor::CastanhoEscuro) => HairBucket::DarkBrown,
        Some(HairColor::CastanhoMedio) => HairBucket::MediumBrown,
        Some(HairColor::CastanhoClaro) => HairBucket::LightBrown,
        Some(HairColor::Loiro) => HairBucket::Blonde,
        Some(HairColor::Ruivo) => HairBucket::Red,
        None => HairBucket::Black,
    }
}

/// Exact-key lookup; `None` when either the row or the cell is absent.
pub fn lookup<R, C, V>(matrix: &Matrix<R, C, V>, row: R, column: C) -> Option<V>
where
    R: PartialEq,
    C: PartialEq,
    V: Copy,
{
    matrix
        .iter()
        .find(|(key, _)| *key == row)
        .and_then(|(_, cells)| cells.iter().find(|(key, _)| *key == column))
        .map(|(_, value)| *value)
}
