use crate::models::{HairColor, IntensityRecommendation, SkinTone};
use crate::tables::{self, FitzpatrickBucket, Matrix};

/// Sentinel carried in both intensity fields of a refusal.
pub const NOT_RECOMMENDED: &str = "Não recomendado";

/// Returned when the matrix has no cell for the bucket and hair color.
pub const DEFAULT_RECOMMENDATION: IntensityRecommendation = advise(
    "Nível 1",
    "Nível 2",
    "Proceda com cautela. Consulte um profissional para orientação personalizada.",
);

const HIGH_BURN_RISK: IntensityRecommendation =
    refuse("Risco alto de queimaduras. Consulte um dermatologista para alternativas seguras.");

const LOW_EFFICACY_ON_LIGHT_HAIR: IntensityRecommendation =
    refuse("Baixa eficácia em cabelos claros. Considere outros métodos de depilação.");

const fn advise(
    initial_intensity: &'static str,
    max_intensity: &'static str,
    observations: &'static str,
) -> IntensityRecommendation {
    IntensityRecommendation {
        initial_intensity,
        max_intensity,
        observations,
        is_recommended: true,
    }
}

const fn refuse(observations: &'static str) -> IntensityRecommendation {
    IntensityRecommendation {
        initial_intensity: NOT_RECOMMENDED,
        max_intensity: NOT_RECOMMENDED,
        observations,
        is_recommended: false,
    }
}

static INTENSITY_MATRIX: &Matrix<FitzpatrickBucket, HairColor, IntensityRecommendation> = &[
    (
        FitzpatrickBucket::OneTwo,
        &[
            (
                HairColor::Preto,
                advise(
                    "Nível 3",
                    "Nível 5",
                    "Comece no nível 3 e aumente para 5 após 2-3 sessões se não houver irritação.",
                ),
            ),
            (
                HairColor::CastanhoEscuro,
                advise(
                    "Nível 2",
                    "Nível 4",
                    "Aumente para nível 4 após 3 sessões, monitorando a reação da pele.",
                ),
            ),
            (
                HairColor::CastanhoMedio,
                advise(
                    "Nível 2",
                    "Nível 3",
                    "Aumente gradualmente, observando a resposta da pele.",
                ),
            ),
            (
                HairColor::CastanhoClaro,
                advise(
                    "Nível 1",
                    "Nível 3",
                    "Eficácia pode ser limitada. Monitore os resultados cuidadosamente.",
                ),
            ),
        ],
    ),
    (
        FitzpatrickBucket::Three,
        &[
            (
                HairColor::Preto,
                advise(
                    "Nível 2",
                    "Nível 4",
                    "Aumente gradualmente, evitando exposição solar antes e após as sessões.",
                ),
            ),
            (
                HairColor::CastanhoEscuro,
                advise(
                    "Nível 1",
                    "Nível 3",
                    "Use 1-2 sessões no nível 1 e avance se a pele responder bem.",
                ),
            ),
            (
                HairColor::CastanhoMedio,
                advise(
                    "Nível 1",
                    "Nível 2",
                    "Proceda com cautela, aumentando apenas se não houver reações.",
                ),
            ),
            (
                HairColor::CastanhoClaro,
                advise(
                    "Nível 1",
                    "Nível 2",
                    "Eficácia limitada. Considere métodos alternativos.",
                ),
            ),
        ],
    ),
    (
        FitzpatrickBucket::Four,
        &[
            (
                HairColor::Preto,
                advise(
                    "Nível 1",
                    "Nível 3",
                    "Teste em pequena área primeiro. Aumente intensidade só se tolerável.",
                ),
            ),
            (
                HairColor::CastanhoMedio,
                advise(
                    "Nível 1",
                    "Nível 2",
                    "Limite-se ao nível 2 para evitar riscos de hiperpigmentação.",
                ),
            ),
            (
                HairColor::CastanhoEscuro,
                advise(
                    "Nível 1",
                    "Nível 2",
                    "Use com extrema cautela. Considere consulta dermatológica.",
                ),
            ),
            (
                HairColor::CastanhoClaro,
                advise(
                    "Nível 1",
                    "Nível 1",
                    "Mantenha intensidade baixa. Eficácia pode ser limitada.",
                ),
            ),
        ],
    ),
    (
        FitzpatrickBucket::Five,
        &[
            (
                HairColor::CastanhoEscuro,
                advise(
                    "Nível 1",
                    "Nível 2",
                    "Use com cuidado extremo, preferindo sessões mais espaçadas.",
                ),
            ),
            (
                HairColor::CastanhoMedio,
                advise(
                    "Nível 1",
                    "Nível 1",
                    "Mantenha intensidade mínima. Alto risco de hiperpigmentação.",
                ),
            ),
            (
                HairColor::Preto,
                advise(
                    "Nível 1",
                    "Nível 2",
                    "Proceda com extrema cautela. Considere consulta médica.",
                ),
            ),
            (
                HairColor::CastanhoClaro,
                refuse("Risco muito alto. Consulte um dermatologista."),
            ),
        ],
    ),
];

/// Advisory device-intensity range. Safety exclusions are checked before
/// the matrix, so they hold for hair colors the matrix never lists.
pub fn recommend(skin_tone: Option<SkinTone>, hair_color: Option<HairColor>) -> IntensityRecommendation {
    let bucket = tables::fitzpatrick_bucket(skin_tone);

    if bucket == FitzpatrickBucket::Six {
        return HIGH_BURN_RISK;
    }

    if matches!(hair_color, Some(HairColor::Loiro) | Some(HairColor::Ruivo)) {
        return LOW_EFFICACY_ON_LIGHT_HAIR;
    }

    hair_color
        .and_then(|hair| tables::lookup(INTENSITY_MATRIX, bucket, hair))
        .unwrap_or(DEFAULT_RECOMMENDATION)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_skins() -> impl Iterator<Item = Option<SkinTone>> {
        SkinTone::ALL.iter().copied().map(Some).chain([None])
    }

    fn all_hairs() -> impl Iterator<Item = Option<HairColor>> {
        HairColor::ALL.iter().copied().map(Some).chain([None])
    }

    #[test]
    fn every_cell_matches_calibrated_values() {
        use HairColor as H;
        use SkinTone as S;

        let cells: [(SkinTone, HairColor, &str, &str, bool, &str); 16] = [
            (S::Branco, H::Preto, "Nível 3", "Nível 5", true,
                "Comece no nível 3 e aumente para 5 após 2-3 sessões se não houver irritação."),
            (S::Branco, H::CastanhoEscuro, "Nível 2", "Nível 4", true,
                "Aumente para nível 4 após 3 sessões, monitorando a reação da pele."),
            (S::Branco, H::CastanhoMedio, "Nível 2", "Nível 3", true,
                "Aumente gradualmente, observando a resposta da pele."),
            (S::Branco, H::CastanhoClaro, "Nível 1", "Nível 3", true,
                "Eficácia pode ser limitada. Monitore os resultados cuidadosamente."),
            (S::Bege, H::Preto, "Nível 2", "Nível 4", true,
                "Aumente gradualmente, evitando exposição solar antes e após as sessões."),
            (S::Bege, H::CastanhoEscuro, "Nível 1", "Nível 3", true,
                "Use 1-2 sessões no nível 1 e avance se a pele responder bem."),
            (S::Bege, H::CastanhoMedio, "Nível 1", "Nível 2", true,
                "Proceda com cautela, aumentando apenas se não houver reações."),
            (S::Bege, H::CastanhoClaro, "Nível 1", "Nível 2", true,
                "Eficácia limitada. Considere métodos alternativos."),
            (S::CastanhoClaro, H::Preto, "Nível 1", "Nível 3", true,
                "Teste em pequena área primeiro. Aumente intensidade só se tolerável."),
            (S::CastanhoClaro, H::CastanhoEscuro, "Nível 1", "Nível 2", true,
                "Use com extrema cautela. Considere consulta dermatológica."),
            (S::CastanhoClaro, H::CastanhoMedio, "Nível 1", "Nível 2", true,
                "Limite-se ao nível 2 para evitar riscos de hiperpigmentação."),
            (S::CastanhoClaro, H::CastanhoClaro, "Nível 1", "Nível 1", true,
                "Mantenha intensidade baixa. Eficácia pode ser limitada."),
            (S::CastanhoMedio, H::Preto, "Nível 1", "Nível 2", true,
                "Proceda com extrema cautela. Considere consulta médica."),
            (S::CastanhoMedio, H::CastanhoEscuro, "Nível 1", "Nível 2", true,
                "Use com cuidado extremo, preferindo sessões mais espaçadas."),
            (S::CastanhoMedio, H::CastanhoMedio, "Nível 1", "Nível 1", true,
                "Mantenha intensidade mínima. Alto risco de hiperpigmentação."),
            (S::CastanhoMedio, H::CastanhoClaro, "Não recomendado", "Não recomendado", false,
                "Risco muito alto. Consulte um dermatologista."),
        ];

        for (skin, hair, initial, max, recommended, observations) in cells {
            let expected = IntensityRecommendation {
                initial_intensity: initial,
                max_intensity: max,
                observations,
                is_recommended: recommended,
            };
            assert_eq!(recommend(Some(skin), Some(hair)), expected, "{skin:?}/{hair:?}");
        }
    }

    #[test]
    fn exclusion_and_default_texts_are_exact() {
        assert_eq!(
            HIGH_BURN_RISK.observations,
            "Risco alto de queimaduras. Consulte um dermatologista para alternativas seguras."
        );
        assert_eq!(
            LOW_EFFICACY_ON_LIGHT_HAIR.observations,
            "Baixa eficácia em cabelos claros. Considere outros métodos de depilação."
        );
        assert_eq!(DEFAULT_RECOMMENDATION.initial_intensity, "Nível 1");
        assert_eq!(DEFAULT_RECOMMENDATION.max_intensity, "Nível 2");
        assert_eq!(
            DEFAULT_RECOMMENDATION.observations,
            "Proceda com cautela. Consulte um profissional para orientação personalizada."
        );
    }

    #[test]
    fn darkest_skin_is_never_recommended() {
        for hair in all_hairs() {
            let result = recommend(Some(SkinTone::CastanhoMuitoEscuro), hair);
            assert!(!result.is_recommended);
            assert_eq!(result, HIGH_BURN_RISK);

            let result = recommend(Some(SkinTone::CastanhoEscuro), hair);
            assert!(!result.is_recommended);
        }
    }

    #[test]
    fn light_hair_is_never_recommended() {
        for skin in all_skins() {
            for hair in [HairColor::Loiro, HairColor::Ruivo] {
                let result = recommend(skin, Some(hair));
                assert!(!result.is_recommended);
                assert_eq!(result.initial_intensity, NOT_RECOMMENDED);
                assert_eq!(result.max_intensity, NOT_RECOMMENDED);
            }
        }
    }

    #[test]
    fn skin_exclusion_takes_precedence_over_hair_exclusion() {
        let result = recommend(Some(SkinTone::CastanhoEscuro), Some(HairColor::Loiro));
        assert_eq!(result, HIGH_BURN_RISK);

        let result = recommend(Some(SkinTone::Branco), Some(HairColor::Loiro));
        assert_eq!(result, LOW_EFFICACY_ON_LIGHT_HAIR);
    }

    #[test]
    fn very_light_skin_black_hair_gets_widest_range() {
        let result = recommend(Some(SkinTone::Branco), Some(HairColor::Preto));
        assert_eq!(result.initial_intensity, "Nível 3");
        assert_eq!(result.max_intensity, "Nível 5");
        assert!(result.is_recommended);
    }

    #[test]
    fn olive_skin_light_brown_hair_is_an_explicit_refusal() {
        let result = recommend(Some(SkinTone::CastanhoMedio), Some(HairColor::CastanhoClaro));
        assert!(!result.is_recommended);
        assert_eq!(result.observations, "Risco muito alto. Consulte um dermatologista.");
    }

    #[test]
    fn unknown_skin_uses_type_three_row() {
        let result = recommend(None, Some(HairColor::Preto));
        assert_eq!(result, recommend(Some(SkinTone::Bege), Some(HairColor::Preto)));
        assert_eq!(result.initial_intensity, "Nível 2");
        assert_eq!(result.max_intensity, "Nível 4");
    }

    #[test]
    fn unknown_hair_falls_back_to_cautious_default() {
        assert_eq!(recommend(Some(SkinTone::Branco), None), DEFAULT_RECOMMENDATION);
        assert!(DEFAULT_RECOMMENDATION.is_recommended);
    }

    #[test]
    fn recommended_results_always_carry_levels() {
        for skin in all_skins() {
            for hair in all_hairs() {
                let result = recommend(skin, hair);
                assert_eq!(result, recommend(skin, hair));
                if result.is_recommended {
                    assert!(result.initial_intensity.starts_with("Nível "));
                    assert!(result.max_intensity.starts_with("Nível "));
                } else {
                    assert_eq!(result.initial_intensity, NOT_RECOMMENDED);
                }
            }
        }
    }
}
