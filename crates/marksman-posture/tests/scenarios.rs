//! End-to-end scenarios for frame, stability and session analysis.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use marksman_posture::{
    deviation::Direction,
    frame::{FrameAnalysis, NO_POSE_FEEDBACK, POSITIVE_FEEDBACK, PostureAnalyzer},
    joint::Joint,
    registry::JointRegistry,
    sample::JointAngleSample,
    stability::{StabilityAnalysis, StabilityAnalyzer},
    summary::{self, PostureQuality, SessionSummary, StabilityRating},
};

fn perfect_stance() -> JointAngleSample {
    JointAngleSample::from([
        (Joint::Knees, 172.5),
        (Joint::Hips, 180.0),
        (Joint::LeftShoulder, 45.0),
        (Joint::RightShoulder, 15.0),
        (Joint::LeftElbow, 75.0),
        (Joint::RightElbow, 90.0),
        (Joint::Wrists, 180.0),
        (Joint::Neck, 12.5),
    ])
}

#[test]
fn test_empty_inputs() {
    let registry = JointRegistry::standard();
    let analysis = PostureAnalyzer::new(registry).analyze(&JointAngleSample::new());
    assert_eq!(analysis.score, 0.0);
    assert_eq!(analysis.feedback, [NO_POSE_FEEDBACK]);
    assert!(analysis.joint_scores.is_empty());
    assert!(analysis.deviations.is_empty());

    let stability = StabilityAnalyzer::new(registry).analyze(&[]);
    assert_eq!(stability, StabilityAnalysis::default());

    assert_eq!(
        summary::summarize(&[], &stability),
        SessionSummary::not_available()
    );
}

#[test]
fn test_perfect_stance() {
    let analysis = PostureAnalyzer::new(JointRegistry::standard()).analyze(&perfect_stance());
    assert!(analysis.score >= 90.0, "score {}", analysis.score);
    assert_eq!(analysis.feedback, [POSITIVE_FEEDBACK]);
    for deviation in analysis.deviations.values() {
        assert_eq!(deviation.percentage, 0.0);
        assert_eq!(deviation.direction, Direction::Within);
    }
}

#[test]
fn test_single_bad_joint() {
    let analyzer = PostureAnalyzer::new(JointRegistry::standard());
    let perfect = analyzer.analyze(&perfect_stance());

    let mut sample = perfect_stance();
    sample.insert(Joint::LeftShoulder, 90.0);
    let analysis = analyzer.analyze(&sample);

    let deviation = analysis.deviations[&Joint::LeftShoulder];
    assert_eq!(deviation.direction, Direction::Above);
    assert!(deviation.percentage > 20.0);
    assert_eq!(
        analysis.feedback,
        ["Lower your left shoulder slightly for better control"]
    );

    let engine = analyzer.engine();
    let expected_drop = 0.2 * (engine.infer(0.0) - engine.infer(deviation.percentage));
    assert_abs_diff_eq!(perfect.score - analysis.score, expected_drop, epsilon = 1e-9);
    assert_abs_diff_eq!(analysis.score, 74.2, epsilon = 1e-6);
}

#[test]
fn test_unknown_joints_are_ignored() {
    let sample: JointAngleSample =
        serde_json::from_str(r#"{"left_shoulder": 45.0, "ankles": 10.0, "spine": 3.0}"#).unwrap();
    let analysis = PostureAnalyzer::new(JointRegistry::standard()).analyze(&sample);
    assert_eq!(analysis.joint_scores.keys().copied().collect::<Vec<_>>(), [Joint::LeftShoulder]);
}

#[test]
fn test_stability_alternating_hips() {
    let samples = (0..10)
        .map(|i| {
            let hips = if i % 2 == 0 { 170.0 } else { 190.0 };
            JointAngleSample::from([(Joint::Knees, 172.5), (Joint::Hips, hips)])
        })
        .collect::<Vec<_>>();
    let analysis = StabilityAnalyzer::new(JointRegistry::standard()).analyze(&samples);

    assert_eq!(analysis.variations[&Joint::Knees].variation_pct, 0.0);
    assert!(analysis.stable_joints.contains(&Joint::Knees));
    assert!(analysis.variations[&Joint::Hips].variation_pct > 5.0);
    assert!(analysis.unstable_joints.contains(&Joint::Hips));
    assert!(analysis.stability_score < 100.0);
    assert_relative_eq!(analysis.stability_score, 86.111_111, max_relative = 1e-6);
}

#[test]
fn test_session_summary_blend() {
    let frame = FrameAnalysis {
        score: 80.0,
        ..PostureAnalyzer::new(JointRegistry::standard()).analyze(&perfect_stance())
    };
    let frames = vec![frame; 5];
    let stability = StabilityAnalysis {
        stability_score: 60.0,
        ..StabilityAnalysis::default()
    };
    let summary = summary::summarize(&frames, &stability);
    assert_relative_eq!(summary.overall_score, 0.7 * 80.0 + 0.3 * 60.0);
    assert_relative_eq!(summary.overall_score, 74.0);
    assert_eq!(summary.posture_quality, PostureQuality::Good);
    assert_eq!(summary.stability, StabilityRating::ModeratelyStable);
}

#[test]
fn test_session_summary_round_trip() {
    let analyzer = PostureAnalyzer::new(JointRegistry::standard());
    let mut slouched = perfect_stance();
    slouched.insert(Joint::Neck, 40.0);
    slouched.insert(Joint::RightElbow, 131.3);
    let samples = vec![perfect_stance(), slouched.clone(), slouched];
    let frames = samples.iter().map(|s| analyzer.analyze(s)).collect::<Vec<_>>();
    let stability = StabilityAnalyzer::new(JointRegistry::standard()).analyze(&samples);
    let summary = summary::summarize(&frames, &stability);

    let json = serde_json::to_string(&summary).unwrap();
    let back: SessionSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(back, summary);
    assert_eq!(back.overall_score.to_bits(), summary.overall_score.to_bits());
}
