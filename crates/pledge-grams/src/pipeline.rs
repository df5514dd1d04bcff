use std::borrow::Cow;

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressDrawTarget, ProgressStyle};
use ndarray::{Array1, Array2, Axis, s};
use pledge_pre_processing::{
    Record,
    pre_processor::{
        CategorySelector, FrequencyDistribution, PresenceVectorizer, Vocabulary, aggregate,
        aggregate_with_diagnostics,
    },
};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    error::ModelError,
    model::{Regressor, mean_squared_error},
    params::ModelParams,
    report::{CategoryReport, GramImpact},
};

/// Feature matrix and labels of one category.
#[derive(Debug, Clone)]
pub struct FeatureSet {
    pub vectorizer: PresenceVectorizer,
    /// One row per selected record; vocabulary columns, then the goal column if any
    pub features: Array2<f64>,
    /// Pledged amount per row
    pub labels: Array1<f64>,
    pub goal_column: Option<usize>,
}

impl FeatureSet {
    #[must_use]
    pub fn rows(&self) -> usize {
        self.features.nrows()
    }
}

fn progress_bar_setup(
    len: usize,
    message: impl Into<Cow<'static, str>>,
    visible: bool,
) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if !visible {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    if let Ok(style) =
        ProgressStyle::default_bar().template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message);
    pb
}

/// Build the category vocabulary and encode every record whose primary
/// category is `category` (every record for `all`), keeping input order.
pub fn build_features(records: &[Record], category: &str, params: &ModelParams) -> FeatureSet {
    let vectorizer_params = params.vectorizer();
    let vocab_selector = params.vocabulary_scope().selector(category);

    let frequencies = match params.diagnostics() {
        Some(top_n) => aggregate_with_diagnostics(
            records,
            &vocab_selector,
            vectorizer_params.stop_list(),
            top_n,
        ),
        None => aggregate(records, &vocab_selector, vectorizer_params.stop_list()),
    };
    let vectorizer = PresenceVectorizer::new(
        Vocabulary::build(&frequencies, &vectorizer_params.cutoffs()),
        vectorizer_params.stop_list().clone(),
    );

    let rows = CategorySelector::primary(category)
        .select(records)
        .collect::<Vec<_>>();
    let presence = vectorizer.transform(rows.iter().copied());

    let goal_column = params.include_goal().then(|| vectorizer.num_features());
    let num_columns = vectorizer.num_features() + usize::from(goal_column.is_some());

    let mut features = Array2::<f64>::zeros((rows.len(), num_columns));
    for (row_idx, row) in presence.outer_iterator().enumerate() {
        for (col_idx, &value) in row.iter() {
            features[[row_idx, col_idx]] = value;
        }
    }
    if let Some(column) = goal_column {
        for (row_idx, record) in rows.iter().enumerate() {
            features[[row_idx, column]] = record.goal();
        }
    }
    let labels = rows.iter().map(|record| record.pledged()).collect::<Array1<f64>>();

    debug!(
        category,
        rows = rows.len(),
        columns = num_columns,
        "Built feature matrix"
    );

    FeatureSet {
        vectorizer,
        features,
        labels,
        goal_column,
    }
}

/// Fit `regressor` on the leading `train_fraction` of a category's rows and
/// report every vocabulary n-gram with its coefficient, largest first.
///
/// The split is positional: the caller's record order decides which rows are held out.
pub fn create_model<R: Regressor + ?Sized>(
    records: &[Record],
    category: &str,
    params: &ModelParams,
    regressor: &R,
) -> Result<CategoryReport, ModelError> {
    let feature_set = build_features(records, category, params);
    let split = params.split_point(feature_set.rows())?;
    if split == 0 {
        return Err(ModelError::InsufficientData {
            category: category.to_owned(),
            rows: feature_set.rows(),
        });
    }

    let x_train = feature_set.features.slice(s![..split, ..]).to_owned();
    let y_train = feature_set.labels.slice(s![..split]).to_owned();
    let x_test = feature_set.features.slice(s![split.., ..]).to_owned();
    let y_test = feature_set.labels.slice(s![split..]).to_owned();
    debug!(
        category,
        train_rows = x_train.len_of(Axis(0)),
        test_rows = x_test.len_of(Axis(0)),
        "Fitting category model"
    );

    let fit = regressor.fit(&x_train, &y_train)?;
    if fit.coefficients.len() != feature_set.features.ncols() {
        return Err(ModelError::DimensionMismatch {
            expected: feature_set.features.ncols(),
            got: fit.coefficients.len(),
        });
    }

    let mse = if !params.validate() {
        None
    } else if y_test.is_empty() {
        warn!(category, "Validation requested but the test split is empty");
        None
    } else {
        mean_squared_error(&y_test, &fit.predict(&x_test)?)
    };

    let vocabulary = feature_set.vectorizer.vocabulary();
    let mut correlations = vocabulary
        .iter()
        .zip(fit.coefficients.iter())
        .enumerate()
        .filter_map(|(index, (gram, &coefficient))| {
            vocabulary.order_of(index).map(|order| GramImpact {
                gram: gram.to_owned(),
                order,
                coefficient,
            })
        })
        .collect::<Vec<_>>();
    // stable: equal coefficients keep vocabulary order
    correlations.sort_by(|a, b| b.coefficient.total_cmp(&a.coefficient));

    Ok(CategoryReport {
        category: category.to_owned(),
        intercept: fit.intercept,
        goal_coefficient: feature_set
            .goal_column
            .map(|column| fit.coefficients[column]),
        correlations,
        mse,
        train_rows: y_train.len(),
        test_rows: y_test.len(),
    })
}

/// The `n` most common category labels, counting every label of every record.
#[must_use]
pub fn top_categories(records: &[Record], n: usize) -> Vec<(String, usize)> {
    let labels = records
        .iter()
        .flat_map(Record::category)
        .collect::<FrequencyDistribution>();
    labels
        .most_common(n)
        .into_iter()
        .map(|(label, count)| (label.to_owned(), count))
        .collect()
}

/// Run [`create_model`] for every category. Categories are independent and
/// fitted in parallel; results come back in the order of `categories`.
pub fn analyze_categories<R, S>(
    records: &[Record],
    categories: &[S],
    params: &ModelParams,
    regressor: &R,
) -> Vec<Result<CategoryReport, ModelError>>
where
    R: Regressor + Sync + ?Sized,
    S: AsRef<str> + Sync,
{
    debug!(num_categories = categories.len(), "Analyzing categories");
    let pb = progress_bar_setup(
        categories.len(),
        "Fitting category models",
        params.progress(),
    );
    let results = categories
        .par_iter()
        .progress_with(pb.clone())
        .map(|category| create_model(records, category.as_ref(), params, regressor))
        .collect();
    pb.finish_with_message("Category models complete");
    results
}

#[cfg(test)]
mod tests {
    use pledge_pre_processing::pre_processor::{Cutoffs, VectorizerParams};

    use super::*;
    use crate::model::RidgeRegression;

    fn records() -> Vec<Record> {
        vec![
            Record::new(["games"], "", ["retro", "pixel", "game"], 900.0, 500.0),
            Record::new(["art", "games"], "", ["pixel", "art"], 10.0, 500.0),
            Record::new(["games"], "", ["board", "game"], 100.0, 200.0),
            Record::new(["games", "video games"], "", ["retro", "game"], 800.0, 400.0),
            Record::new(["art"], "", ["oil", "painting"], 50.0, 100.0),
        ]
    }

    #[test]
    fn test_build_features_shape() {
        let params = ModelParams::default();
        let feature_set = build_features(&records(), "games", &params);

        assert_eq!(feature_set.rows(), 3);
        assert_eq!(feature_set.features.ncols(), feature_set.vectorizer.num_features());
        assert_eq!(feature_set.labels.to_vec(), [900.0, 100.0, 800.0]);
        assert!(feature_set.goal_column.is_none());
        assert!(feature_set.features.iter().all(|&v| v == 0.0 || v == 1.0));
    }

    #[test]
    fn test_vocabulary_scope_changes_vocabulary_only() {
        let records = records();
        let primary = build_features(&records, "games", &ModelParams::default());
        let any = build_features(
            &records,
            "games",
            &ModelParams::default().with_vocabulary_scope(crate::params::VocabularyScope::AnyLabel),
        );

        assert!(!primary.vectorizer.vocabulary().contains("art"));
        assert!(any.vectorizer.vocabulary().contains("art"));
        assert_eq!(primary.rows(), any.rows());
    }

    #[test]
    fn test_goal_column() {
        let params = ModelParams::default().with_goal_feature(true);
        let feature_set = build_features(&records(), "games", &params);
        let column = feature_set.goal_column.expect("goal column requested");

        assert_eq!(column, feature_set.vectorizer.num_features());
        assert_eq!(feature_set.features.column(column).to_vec(), [500.0, 200.0, 400.0]);
    }

    #[test]
    fn test_create_model_sorts_descending() {
        let params = ModelParams::default()
            .with_train_fraction(1.0)
            .with_vectorizer(VectorizerParams::default().with_cutoffs(Cutoffs::new(10, 5, 2)));
        let report = create_model(&records(), "games", &params, &RidgeRegression::new(1.0))
            .expect("enough rows");

        assert_eq!(report.train_rows, 3);
        assert_eq!(report.test_rows, 0);
        assert!(report.mse.is_none());
        assert!(
            report
                .correlations
                .windows(2)
                .all(|pair| pair[0].coefficient >= pair[1].coefficient)
        );
        let coefficient = |gram: &str| {
            report
                .correlations
                .iter()
                .find(|impact| impact.gram == gram)
                .map(|impact| impact.coefficient)
                .expect("gram in vocabulary")
        };
        // "board" only appears in the lowest pledged record, "retro" in the two highest
        assert!(coefficient("board") < 0.0);
        assert!(coefficient("retro") > 0.0);
    }

    #[test]
    fn test_empty_category_is_insufficient() {
        let result = create_model(
            &records(),
            "dance",
            &ModelParams::default(),
            &RidgeRegression::default(),
        );
        assert!(matches!(
            result,
            Err(ModelError::InsufficientData { rows: 0, .. })
        ));
    }

    #[test]
    fn test_insufficient_data_reports_matching_rows() {
        let result = create_model(
            &records(),
            "art",
            &ModelParams::default().with_train_fraction(0.4),
            &RidgeRegression::default(),
        );
        assert!(matches!(
            result,
            Err(ModelError::InsufficientData { rows: 2, .. })
        ));
    }

    #[test]
    fn test_progress_bar_hidden_when_disabled() {
        assert!(progress_bar_setup(3, "Fitting", false).is_hidden());
    }

    #[test]
    fn test_top_categories() {
        let top = top_categories(&records(), 2);
        assert_eq!(top, [("games".to_string(), 4), ("art".to_string(), 2)]);
    }

    #[test]
    fn test_analyze_categories_keeps_order() {
        let params = ModelParams::default()
            .with_train_fraction(1.0)
            .with_progress(false);
        let results = analyze_categories(
            &records(),
            &["art", "dance", "games"],
            &params,
            &RidgeRegression::default(),
        );

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().map(|r| r.category.as_str()).ok(), Some("art"));
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().map(|r| r.category.as_str()).ok(), Some("games"));
    }
}
