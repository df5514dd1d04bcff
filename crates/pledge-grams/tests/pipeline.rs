use std::sync::Mutex;

use ndarray::{Array1, Array2};
use pledge_grams::{
    Analyzer, Cutoffs, LinearFit, ModelError, ModelParams, Record, Regressor, RidgeRegression,
    VectorizerParams, build_features, create_model,
};

/// Captures the training data it is handed and predicts zero everywhere.
#[derive(Default)]
struct RecordingRegressor {
    seen: Mutex<Option<(Array2<f64>, Array1<f64>)>>,
}

impl Regressor for RecordingRegressor {
    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<LinearFit, ModelError> {
        *self.seen.lock().unwrap() = Some((x.clone(), y.clone()));
        Ok(LinearFit {
            coefficients: Array1::zeros(x.ncols()),
            intercept: 0.0,
        })
    }
}

const DESCRIPTIONS: [&str; 10] = [
    "great camera for indie games",
    "indie games with a great story",
    "the creator 's first board game",
    "retro pixel art games",
    "a great camera rig",
    "board game night kit",
    "indie film about games",
    "retro games remastered",
    "great board game for families",
    "pixel art camera strap",
];

fn games_records() -> Vec<Record> {
    let mut records = DESCRIPTIONS
        .iter()
        .enumerate()
        .map(|(i, text)| {
            Record::new(
                ["games"],
                *text,
                text.split(' '),
                100.0 * (i + 1) as f64,
                1_000.0 + i as f64,
            )
        })
        .collect::<Vec<_>>();
    records.push(Record::new(["art"], "", ["oil", "paint"], 5.0, 10.0));
    records
}

#[test]
fn feature_matrix_has_one_row_per_category_record() {
    let records = games_records();
    let feature_set = build_features(&records, "games", &ModelParams::default());

    assert_eq!(feature_set.features.nrows(), 10);
    assert_eq!(
        feature_set.features.ncols(),
        feature_set.vectorizer.vocabulary().len()
    );
    assert_eq!(feature_set.labels.len(), 10);
}

#[test]
fn split_is_positional_nine_to_one() {
    let records = games_records();
    let regressor = RecordingRegressor::default();
    let params = ModelParams::default().with_validation(true);

    let report = create_model(&records, "games", &params, &regressor).expect("fits");
    assert_eq!(report.train_rows, 9);
    assert_eq!(report.test_rows, 1);

    let (x, y) = regressor.seen.lock().unwrap().take().expect("fit called");
    assert_eq!(x.nrows(), 9);
    assert_eq!(y.to_vec(), (1..=9).map(|i| 100.0 * i as f64).collect::<Vec<_>>());

    // zero predictions leave the held-out pledge itself as the error
    assert_eq!(report.mse, Some(1_000.0 * 1_000.0));
}

#[test]
fn goal_coefficient_is_reported_separately() {
    let records = games_records();
    let params = ModelParams::default()
        .with_goal_feature(true)
        .with_vectorizer(VectorizerParams::default().with_cutoffs(Cutoffs::new(5, 3, 1)));

    let report = create_model(&records, "games", &params, &RidgeRegression::default())
        .expect("fits");
    assert!(report.goal_coefficient.is_some());
    assert_eq!(report.vocabulary_size(), 9);
}

#[test]
fn vocabulary_respects_cutoffs_and_stop_list() {
    let records = games_records();
    let params = ModelParams::default()
        .with_vectorizer(VectorizerParams::default().with_cutoffs(Cutoffs::new(4, 2, 1)));
    let feature_set = build_features(&records, "games", &params);
    let vocabulary = feature_set.vectorizer.vocabulary();

    assert_eq!(vocabulary.len(), 7);
    assert!(vocabulary.contains("games"));
    assert!(vocabulary.iter().all(|gram| !gram.split(' ').any(|t| t == "'s")));
    for (index, gram) in vocabulary.iter().enumerate() {
        assert_eq!(vocabulary.index_of(gram), Some(index));
    }
}

#[test]
fn coefficients_are_sorted_descending() {
    let report = Analyzer::new()
        .with_alpha(1.0)
        .analyze(&games_records(), "games")
        .expect("fits");

    assert!(!report.correlations.is_empty());
    assert!(
        report
            .correlations
            .windows(2)
            .all(|pair| pair[0].coefficient >= pair[1].coefficient)
    );
}

#[test]
fn single_record_category_is_insufficient() {
    let err = create_model(
        &games_records(),
        "art",
        &ModelParams::default(),
        &RidgeRegression::default(),
    )
    .expect_err("one row leaves nothing to train on");
    assert!(matches!(
        err,
        ModelError::InsufficientData { ref category, rows: 1 } if category == "art"
    ));
}

#[test]
fn all_selects_every_record() {
    let feature_set = build_features(&games_records(), "all", &ModelParams::default());
    assert_eq!(feature_set.features.nrows(), 11);
}
