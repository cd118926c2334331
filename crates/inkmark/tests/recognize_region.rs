mod common;

use std::sync::Arc;

use common::{band_recognizer, circle, line, region_with};
use inkmark::{
    sequence_features, LinearModel, Pattern, RecognizeError, Recognizer, Region, ScaleRange,
    SequencingResult,
};

fn patterns(results: &[SequencingResult]) -> Vec<Pattern> {
    results.iter().filter_map(|r| r.pattern).collect()
}

#[test]
fn slash_then_back_slash_yields_one_cross() {
    let slash = line(1, [10, 90], [90, 10], 17);
    let back_slash = line(2, [10, 10], [90, 90], 17);
    let (start, stop) = (slash.start_ms, back_slash.stop_ms);
    let region = region_with(vec![slash, back_slash]);

    let results = band_recognizer().recognize(&region, false).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(patterns(&results), vec![Pattern::Cross]);
    assert_eq!(results[0].sequence, 1);
    assert_eq!((results[0].start_ms, results[0].stop_ms), (start, stop));
    assert_eq!(results[0].likelihoods.cross, 95.0);
}

#[test]
fn separately_drawn_diagonals_still_pair() {
    let region = region_with(vec![
        line(1, [10, 90], [90, 10], 17),
        line(4, [10, 10], [90, 90], 17),
    ]);
    let results = band_recognizer().recognize(&region, false).unwrap();
    assert_eq!(patterns(&results), vec![Pattern::Cross]);
}

#[test]
fn circle_with_crossing_stroke_yields_two_results() {
    let region = region_with(vec![
        circle(1, [50, 50], 40, 40),
        line(2, [20, 50], [80, 50], 11),
    ]);
    let results = band_recognizer().recognize(&region, false).unwrap();
    assert_eq!(patterns(&results), vec![Pattern::Circle, Pattern::CrossedOut]);
    let numbers: Vec<u32> = results.iter().map(|r| r.sequence).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(results[0].likelihoods.circle, 88.0);
    assert_eq!(results[1].likelihoods.crossed_out, 90.0);
}

#[test]
fn empty_region_placeholder() {
    let recognizer = band_recognizer();
    let region = Region::new(0, 0, 100, 100, 10);
    assert!(recognizer.recognize(&region, false).unwrap().is_empty());

    let shown = recognizer.recognize(&region, true).unwrap();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].sequence, 0);
    assert_eq!(shown[0].likelihoods.to_array(), [0.0; 5]);
}

#[test]
fn recognizer_features_match_export_path() {
    let recognizer = band_recognizer();
    let strokes = [circle(1, [50, 50], 40, 40), line(2, [20, 50], [80, 50], 11)];
    let refs: Vec<_> = strokes.iter().collect();
    assert_eq!(
        recognizer.features(&refs),
        sequence_features(&refs, recognizer.config())
    );
}

#[test]
fn linear_model_file_drives_recognition() {
    // Band A (scaled by 100) pushes towards slash, band B towards back-slash.
    let mut weights = vec![vec![0.0; 5]; 5];
    weights[Pattern::Slash.index()][2] = 10.0;
    weights[Pattern::BackSlash.index()][3] = 10.0;
    let model = LinearModel::new(weights, vec![0.0; 5]).unwrap();
    let path = std::env::temp_dir().join(format!("inkmark-it-{}.json", std::process::id()));
    std::fs::write(&path, model.to_json_string().unwrap()).unwrap();

    let recognizer = Recognizer::from_model_file(&path).with_scale_range(ScaleRange::default());
    let region = region_with(vec![line(1, [10, 90], [90, 10], 17)]);
    let results = recognizer.recognize(&region, false).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(patterns(&results), vec![Pattern::Slash]);
    assert!(results[0].likelihoods.slash > 99.0);
}

#[test]
fn unreadable_model_is_reported_with_its_path() {
    let path = std::env::temp_dir().join("inkmark-it-missing.json");
    let recognizer = Recognizer::from_model_file(&path);
    let region = region_with(vec![line(1, [10, 90], [90, 10], 17)]);
    let err = recognizer.recognize(&region, false).unwrap_err();
    assert!(matches!(err, RecognizeError::ModelUnavailable { .. }));
    assert!(err.to_string().contains("inkmark-it-missing.json"));
}

#[test]
fn shared_recognizer_across_threads() {
    let recognizer = Arc::new(band_recognizer());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let r = Arc::clone(&recognizer);
            std::thread::spawn(move || {
                let region = region_with(vec![circle(1, [50, 50], 40, 40)]);
                r.recognize(&region, false).unwrap()
            })
        })
        .collect();
    for h in handles {
        assert_eq!(patterns(&h.join().unwrap()), vec![Pattern::Circle]);
    }
}
