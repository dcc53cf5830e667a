use crate::models::Confidence;

pub struct ConfidenceAggregator;

impl ConfidenceAggregator {
    /// Mean of the recorded scores. Fields that were never scored do not count
    /// towards the denominator; no scores at all gives `0.0`.
    pub fn aggregate(scores: &[Option<Confidence>]) -> f32 {
        let recorded: Vec<f32> = scores.iter().flatten().map(|score| score.value()).collect();
        if recorded.is_empty() {
            return 0.0;
        }
        let mean = recorded.iter().sum::<f32>() / recorded.len() as f32;
        Confidence::new(mean).value()
    }
}
