//! Cross-pillar insight synthesis.
//!
//! The summary list is a pure reduction over every pillar's insights taken in
//! pillar order. Sorting is stable, so equal scores keep that order.

use scoring_core::{Grade, Insight, Pillar, PillarScore};
use std::cmp::Ordering;
use std::collections::HashSet;

const TOP_POSITIVES: usize = 2;
const TOP_CONCERNS: usize = 2;
const STRENGTH_THRESHOLD: f64 = 80.0;
const WEAKNESS_THRESHOLD: f64 = 40.0;

/// One pillar's contribution to the summary.
#[derive(Debug, Clone, Copy)]
pub struct PillarSummary<'a> {
    pub pillar: Pillar,
    pub total: f64,
    pub insights: &'a [Insight],
}

impl<'a> PillarSummary<'a> {
    pub fn of(pillar: Pillar, score: &'a impl PillarScore) -> Self {
        Self {
            pillar,
            total: score.total(),
            insights: score.insights(),
        }
    }
}

pub fn grade_insight(grade: Grade, total_score: f64) -> Insight {
    let insight = match grade {
        Grade::APlus | Grade::A => Insight::positive(format!(
            "Excellent investment profile (grade {}, score {:.1})",
            grade, total_score
        )),
        Grade::B => Insight::positive(format!(
            "Good investment profile (grade {}, score {:.1})",
            grade, total_score
        )),
        Grade::C => Insight::warning(format!(
            "Average investment profile, needs further research (grade {}, score {:.1})",
            grade, total_score
        )),
        Grade::D | Grade::F => Insight::warning(format!(
            "Caution: weak investment profile (grade {}, score {:.1})",
            grade, total_score
        )),
    };
    insight.with_score(total_score)
}

/// Highest `n` positive insights, best score first; unscored insights rank last.
pub fn top_positives(pillars: &[PillarSummary<'_>], n: usize) -> Vec<Insight> {
    let mut positives: Vec<&Insight> = pillars
        .iter()
        .flat_map(|p| p.insights.iter())
        .filter(|i| i.is_positive())
        .collect();
    positives.sort_by(|a, b| {
        let a = a.score.unwrap_or(f64::NEG_INFINITY);
        let b = b.score.unwrap_or(f64::NEG_INFINITY);
        b.partial_cmp(&a).unwrap_or(Ordering::Equal)
    });
    positives.into_iter().take(n).cloned().collect()
}

/// Lowest `n` warning or negative insights, worst score first; unscored insights rank last.
pub fn top_concerns(pillars: &[PillarSummary<'_>], n: usize) -> Vec<Insight> {
    let mut concerns: Vec<&Insight> = pillars
        .iter()
        .flat_map(|p| p.insights.iter())
        .filter(|i| !i.is_positive())
        .collect();
    concerns.sort_by(|a, b| {
        let a = a.score.unwrap_or(f64::INFINITY);
        let b = b.score.unwrap_or(f64::INFINITY);
        a.partial_cmp(&b).unwrap_or(Ordering::Equal)
    });
    concerns.into_iter().take(n).cloned().collect()
}

/// First pillar with the highest total.
pub fn strongest<'a>(pillars: &[PillarSummary<'a>]) -> Option<PillarSummary<'a>> {
    pillars.iter().copied().fold(None, |best, p| match best {
        Some(b) if b.total >= p.total => Some(b),
        _ => Some(p),
    })
}

/// First pillar with the lowest total.
pub fn weakest<'a>(pillars: &[PillarSummary<'a>]) -> Option<PillarSummary<'a>> {
    pillars.iter().copied().fold(None, |worst, p| match worst {
        Some(w) if w.total <= p.total => Some(w),
        _ => Some(p),
    })
}

/// Build the ranked, de-duplicated summary for a composite score.
pub fn synthesize(grade: Grade, total_score: f64, pillars: &[PillarSummary<'_>]) -> Vec<Insight> {
    let mut summary = vec![grade_insight(grade, total_score)];
    summary.extend(top_positives(pillars, TOP_POSITIVES));
    summary.extend(top_concerns(pillars, TOP_CONCERNS));

    if let Some(best) = strongest(pillars) {
        if best.total >= STRENGTH_THRESHOLD {
            summary.push(
                Insight::positive(format!("Strength: {} ({:.0}/100)", best.pillar, best.total))
                    .with_score(best.total),
            );
        }
    }
    if let Some(worst) = weakest(pillars) {
        if worst.total < WEAKNESS_THRESHOLD {
            summary.push(
                Insight::warning(format!("Weakness: {} ({:.0}/100)", worst.pillar, worst.total))
                    .with_score(worst.total),
            );
        }
    }

    let mut seen = HashSet::new();
    summary.retain(|i| seen.insert(i.message.clone()));
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoring_core::InsightKind;

    fn summaries<'a>(insights: &'a [Vec<Insight>; 5], totals: [f64; 5]) -> Vec<PillarSummary<'a>> {
        Pillar::ALL
            .iter()
            .zip(insights.iter())
            .zip(totals)
            .map(|((&pillar, insights), total)| PillarSummary {
                pillar,
                total,
                insights,
            })
            .collect()
    }

    #[test]
    fn test_positives_ranked_by_score_with_unscored_last() {
        let insights = [
            vec![Insight::positive("q-unscored"), Insight::positive("q-50").with_score(50.0)],
            vec![Insight::positive("m-90").with_score(90.0)],
            vec![],
            vec![Insight::positive("g-50").with_score(50.0)],
            vec![],
        ];
        let pillars = summaries(&insights, [50.0; 5]);
        let top: Vec<String> = top_positives(&pillars, 3).into_iter().map(|i| i.message).collect();
        // Tie at 50 keeps pillar order
        assert_eq!(top, vec!["m-90", "q-50", "g-50"]);
    }

    #[test]
    fn test_concerns_ranked_worst_first() {
        let insights = [
            vec![Insight::warning("q-unscored")],
            vec![Insight::negative("m-10").with_score(10.0)],
            vec![Insight::warning("v-0").with_score(0.0)],
            vec![Insight::positive("g-pos").with_score(0.0)],
            vec![Insight::warning("mo-40").with_score(40.0)],
        ];
        let pillars = summaries(&insights, [50.0; 5]);
        let top: Vec<String> = top_concerns(&pillars, 4).into_iter().map(|i| i.message).collect();
        assert_eq!(top, vec!["v-0", "m-10", "mo-40", "q-unscored"]);
    }

    #[test]
    fn test_strength_and_weakness_ties_pick_first_pillar() {
        let insights: [Vec<Insight>; 5] = Default::default();
        let pillars = summaries(&insights, [85.0, 85.0, 30.0, 60.0, 30.0]);
        assert_eq!(strongest(&pillars).unwrap().pillar, Pillar::Quality);
        assert_eq!(weakest(&pillars).unwrap().pillar, Pillar::Value);
    }

    #[test]
    fn test_synthesize_layout() {
        let insights = [
            vec![Insight::positive("Quality up").with_score(95.0)],
            vec![Insight::positive("Moat up").with_score(70.0)],
            vec![Insight::warning("Value down").with_score(10.0)],
            vec![Insight::positive("Growth up").with_score(60.0)],
            vec![Insight::negative("Momentum down").with_score(20.0)],
        ];
        let pillars = summaries(&insights, [90.0, 70.0, 35.0, 60.0, 50.0]);
        let summary = synthesize(Grade::B, 72.5, &pillars);

        let messages: Vec<&str> = summary.iter().map(|i| i.message.as_str()).collect();
        assert!(messages[0].starts_with("Good investment profile"));
        assert_eq!(&messages[1..5], &["Quality up", "Moat up", "Value down", "Momentum down"]);
        assert_eq!(messages[5], "Strength: Quality (90/100)");
        assert_eq!(messages[6], "Weakness: Value (35/100)");
        assert_eq!(summary[6].kind, InsightKind::Warning);
    }

    #[test]
    fn test_synthesize_drops_duplicate_messages() {
        let insights = [
            vec![Insight::positive("Same").with_score(80.0)],
            vec![Insight::positive("Same").with_score(70.0)],
            vec![],
            vec![],
            vec![],
        ];
        let pillars = summaries(&insights, [60.0; 5]);
        let summary = synthesize(Grade::C, 60.0, &pillars);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].kind, InsightKind::Warning);
        assert_eq!(summary[1].message, "Same");
    }
}
