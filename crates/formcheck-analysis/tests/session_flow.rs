//! Full sessions replayed through the analyzer from flat landmark buffers.

use formcheck_analysis::{ExerciseAnalyzer, Phase, RepFlag};
use formcheck_core::{ExerciseRegistry, Frame, PoseLandmark, Timestamp};

const STRIDE: usize = 4;

fn put(buf: &mut [f64], landmark: PoseLandmark, x: f64, y: f64) {
    let i = landmark.index() * STRIDE;
    buf[i] = x;
    buf[i + 1] = y;
    buf[i + 2] = 0.0;
    buf[i + 3] = 0.99;
}

/// Buffer with every slot marked absent (NaN coordinates)
fn blank() -> Vec<f64> {
    vec![f64::NAN; Frame::LANDMARK_COUNT * STRIDE]
}

fn squat_frame(knee_angle: f64) -> Frame {
    let mut buf = blank();
    let theta = knee_angle.to_radians();
    for (x, out, shoulder, hip, knee, ankle) in [
        (
            0.6,
            1.0,
            PoseLandmark::LeftShoulder,
            PoseLandmark::LeftHip,
            PoseLandmark::LeftKnee,
            PoseLandmark::LeftAnkle,
        ),
        (
            0.4,
            -1.0,
            PoseLandmark::RightShoulder,
            PoseLandmark::RightHip,
            PoseLandmark::RightKnee,
            PoseLandmark::RightAnkle,
        ),
    ] {
        put(&mut buf, shoulder, x, 0.25);
        put(&mut buf, hip, x, 0.5);
        put(&mut buf, knee, x, 0.7);
        put(&mut buf, ankle, x + out * 0.2 * theta.sin(), 0.7 - 0.2 * theta.cos());
    }
    Frame::from_flat(&buf).unwrap()
}

fn abduction_frame(angle: f64) -> Frame {
    let mut buf = blank();
    let theta = angle.to_radians();
    for (x, out, shoulder, elbow, hip) in [
        (0.6, 1.0, PoseLandmark::LeftShoulder, PoseLandmark::LeftElbow, PoseLandmark::LeftHip),
        (0.4, -1.0, PoseLandmark::RightShoulder, PoseLandmark::RightElbow, PoseLandmark::RightHip),
    ] {
        put(&mut buf, shoulder, x, 0.3);
        put(&mut buf, hip, x, 0.6);
        put(&mut buf, elbow, x + out * 0.15 * theta.sin(), 0.3 + 0.15 * theta.cos());
    }
    Frame::from_flat(&buf).unwrap()
}

#[test]
fn squat_session_counts_each_cycle_once() {
    let registry = ExerciseRegistry::default();
    let config = registry.lookup("squat").unwrap();
    let mut analyzer = ExerciseAnalyzer::new();

    let cycle = [170.0, 140.0, 115.0, 85.0, 75.0, 85.0, 115.0, 140.0, 170.0];
    let mut t = 0;
    for _ in 0..3 {
        for angle in cycle {
            analyzer.analyze_at(&squat_frame(angle), config, Timestamp::from_millis(t));
            t += 33;
        }
    }

    assert_eq!(analyzer.rep_count(), 3);
    let reps = analyzer.rep_data();
    assert_eq!(reps.len(), 3);
    for (i, rep) in reps.iter().enumerate() {
        assert_eq!(rep.rep_index, i as u32 + 1);
        assert!(rep.is_clean());
    }
    assert!(reps.windows(2).all(|w| w[0].timestamp < w[1].timestamp));

    let summary = analyzer.summary(config);
    assert_eq!(summary.total_reps, 3);
    assert_eq!(summary.mean_score, Some(100.0));
}

#[test]
fn squat_hovering_near_gate_counts_nothing_extra() {
    let config = ExerciseRegistry::default().lookup("squat").unwrap().clone();
    let mut analyzer = ExerciseAnalyzer::new();

    for angle in [119.0, 118.0, 119.5, 110.0, 100.0, 119.9] {
        analyzer.analyze_at(&squat_frame(angle), &config, Timestamp::from_millis(0));
    }
    assert_eq!(analyzer.rep_count(), 0);
    assert_eq!(analyzer.state().last_position(), Phase::Down);

    analyzer.analyze_at(&squat_frame(121.0), &config, Timestamp::from_millis(0));
    assert_eq!(analyzer.rep_count(), 1);
    assert_eq!(
        analyzer.rep_data()[0].flags.iter().copied().collect::<Vec<_>>(),
        vec![RepFlag::ShallowSquat]
    );
}

#[test]
fn abduction_session_counts_on_return_to_sides() {
    let registry = ExerciseRegistry::default();
    let config = registry.lookup("shoulderAbduction").unwrap();
    let mut analyzer = ExerciseAnalyzer::new();

    // Start with arms raised so the initial up phase does not count
    for angle in [88.0, 60.0, 40.0, 25.0, 50.0, 80.0, 90.0, 60.0, 35.0, 20.0] {
        analyzer.analyze_at(&abduction_frame(angle), config, Timestamp::from_millis(0));
    }
    assert_eq!(analyzer.rep_count(), 2);

    // Staying in the middle band never counts
    for angle in [40.0, 55.0, 70.0, 50.0, 35.0] {
        analyzer.analyze_at(&abduction_frame(angle), config, Timestamp::from_millis(0));
    }
    assert_eq!(analyzer.rep_count(), 2);
}

#[test]
fn missing_landmarks_degrade_silently() {
    let config = ExerciseRegistry::default().lookup("squat").unwrap().clone();
    let mut analyzer = ExerciseAnalyzer::new();

    let metrics = analyzer.analyze_at(&Frame::empty(), &config, Timestamp::from_millis(0));
    assert_eq!(metrics.rep_count, 0);
    assert_eq!(metrics.current_score, 100);
    assert!(metrics.feedback.is_empty());
    assert!(!metrics.is_in_position);
    assert_eq!(metrics.angles.knee, 0.0);
}

#[test]
fn metrics_serialize_for_ui() {
    let config = ExerciseRegistry::default().lookup("squat").unwrap().clone();
    let mut analyzer = ExerciseAnalyzer::new();
    let metrics = analyzer.analyze_at(&squat_frame(100.0), &config, Timestamp::from_millis(0));

    let json = serde_json::to_value(&metrics).unwrap();
    assert_eq!(json["repCount"], 0);
    assert_eq!(json["currentScore"], 85);
    assert_eq!(json["isInPosition"], true);
    assert!(json["angles"]["knee"].as_f64().unwrap() > 99.0);
}
