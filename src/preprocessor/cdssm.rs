//! CDSSM preprocessor: letter n-gram word hashing with sliding windows.

use crate::config::{Config, PreprocessorConfig};
use crate::datapack::{segment, DataPack, Segmented, Stage, TextPair};
use crate::error::{PreprocessError, Result};
use crate::hashing::{NgramLetterUnit, TermHasher, Vocabulary};
use crate::preprocessor::ProcessingContext;
use crate::shape::{fixed_length, SlidingWindowUnit, WindowTensor};
use crate::text::Normalizer;
use log::{debug, info, warn};
use ndarray::ArrayView2;
use std::sync::Arc;

/// Fitted state: the context plus the data segmented during fit.
#[derive(Debug, Clone)]
struct Fitted {
    context: Arc<ProcessingContext>,
    segmented: Arc<Segmented>,
}

/// Turns query/document pairs into `(window_nb, dims * sliding_window)`
/// letter n-gram window tensors.
///
/// Every token becomes one row of width `dims` holding the counts of its
/// letter n-grams. Rows are padded or truncated to
/// `window_nb + sliding_window - 1` and cut into stride-1 windows.
///
/// # Example
///
/// ```
/// use cdssm_preprocessor::{CdssmPreprocessor, Config, Stage, TextPair};
///
/// let train = vec![TextPair::labeled(
///     "id0",
///     "id1",
///     "beijing",
///     "Beijing is capital of China",
///     1.0,
/// )];
/// let mut preprocessor = CdssmPreprocessor::new(Config::default())?;
/// let pack = preprocessor.fit_transform(&train, Stage::Train)?;
///
/// let dims = pack.context.dims();
/// assert_eq!(pack.left_of("id0").unwrap().dim(), (5, dims * 3));
/// # Ok::<(), cdssm_preprocessor::PreprocessError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CdssmPreprocessor {
    config: PreprocessorConfig,
    normalizer: Normalizer,
    ngram: NgramLetterUnit,
    slide: SlidingWindowUnit,
    fitted: Option<Fitted>,
}

impl CdssmPreprocessor {
    /// Creates an unfitted preprocessor, validating the window geometry.
    pub fn new(config: Config) -> Result<Self> {
        config.preprocessor.validate()?;

        Ok(Self {
            normalizer: Normalizer::new(&config.text),
            ngram: NgramLetterUnit::new(config.preprocessor.sliding_window),
            slide: SlidingWindowUnit::new(config.preprocessor.sliding_window),
            config: config.preprocessor,
            fitted: None,
        })
    }

    /// Window geometry and padding settings.
    pub fn config(&self) -> &PreprocessorConfig {
        &self.config
    }

    /// The fitted context, if `fit` has run.
    pub fn context(&self) -> Option<&Arc<ProcessingContext>> {
        self.fitted.as_ref().map(|fitted| &fitted.context)
    }

    /// Returns true once `fit` has succeeded.
    #[inline]
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Builds the n-gram vocabulary from `inputs`.
    ///
    /// Unique left texts are read first, then unique right texts, each in
    /// first-seen order. A previous fit is replaced only after the new one has
    /// fully succeeded.
    pub fn fit(&mut self, inputs: &[TextPair], stage: Stage) -> Result<&mut Self> {
        info!("Building vocabulary from {} {} pairs", inputs.len(), stage);

        let segmented = segment(inputs, stage)?;
        let vocabulary = Vocabulary::fit(
            segmented
                .texts()
                .flat_map(|text| self.ngram.transform(&self.normalizer.normalize(text))),
        );

        if vocabulary.is_empty() {
            warn!(
                "{}; only the OOV slot is available",
                PreprocessError::DegenerateVocabulary
            );
        }

        let context = ProcessingContext::new(
            vocabulary,
            self.config.window_nb,
            self.config.sliding_window,
        );
        info!(
            "Vocabulary built: {} terms, dims {}, input shapes {:?}",
            context.vocabulary().len(),
            context.dims(),
            context.input_shapes()
        );

        self.fitted = Some(Fitted {
            context: Arc::new(context),
            segmented: Arc::new(segmented),
        });
        Ok(self)
    }

    /// Produces window tensors for every left and right text.
    ///
    /// `Stage::Test` segments `inputs` afresh. `Stage::Train` reuses the data
    /// segmented by the last `fit` and does not read `inputs`.
    pub fn transform(&self, inputs: &[TextPair], stage: Stage) -> Result<DataPack> {
        let fitted = self.fitted.as_ref().ok_or(PreprocessError::MissingContext)?;
        let segmented = match stage {
            Stage::Test => Arc::new(segment(inputs, stage)?),
            Stage::Train => Arc::clone(&fitted.segmented),
        };

        info!(
            "Processing {} pairs for {} stage ({} left, {} right texts)",
            segmented.relation.len(),
            stage,
            segmented.left.len(),
            segmented.right.len()
        );

        let context = &fitted.context;
        let left = segmented
            .left
            .try_par_map(|text| self.process_text(context, text))?;
        let right = segmented
            .right
            .try_par_map(|text| self.process_text(context, text))?;

        debug!("Transformed {} left and {} right texts", left.len(), right.len());

        Ok(DataPack {
            relation: segmented.relation.clone(),
            left,
            right,
            context: Arc::clone(context),
        })
    }

    /// `fit` followed by `transform` on the same inputs.
    pub fn fit_transform(&mut self, inputs: &[TextPair], stage: Stage) -> Result<DataPack> {
        self.fit(inputs, stage)?;
        self.transform(inputs, stage)
    }

    /// Converts one text into its window tensor under `context`.
    ///
    /// Pure: depends only on the text, the context and the configuration.
    /// Tokens are padded or truncated to `text_length` rows before hashing,
    /// so only surviving rows are ever materialized.
    pub fn process_text(&self, context: &ProcessingContext, text: &str) -> Result<WindowTensor> {
        let hasher = TermHasher::new(context.vocabulary());
        let dims = context.dims();
        let text_length = self.config.text_length();
        let width = text_length.checked_mul(dims).ok_or_else(|| {
            PreprocessError::Config(format!("{text_length} rows of {dims} dims overflow usize"))
        })?;

        let tokens = self.normalizer.normalize(text);
        let rows = fixed_length(
            tokens.iter().map(Some).collect::<Vec<_>>(),
            text_length,
            None,
            self.config.pad_mode,
            self.config.truncate_mode,
        );

        let mut fixed = vec![0.0; width];
        for (token, row) in rows.into_iter().zip(fixed.chunks_exact_mut(dims)) {
            match token {
                Some(token) => hasher.accumulate(&self.ngram.transform_token(token), row),
                None => row.fill(self.config.pad_value),
            }
        }

        let rows = ArrayView2::from_shape((text_length, dims), &fixed)?;
        Ok(self.slide.transform(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PadMode, TruncateMode};
    use crate::shape::FixedLengthUnit;

    fn preprocessor() -> CdssmPreprocessor {
        CdssmPreprocessor::new(Config::default()).unwrap()
    }

    fn single_pair() -> Vec<TextPair> {
        vec![TextPair::labeled("id0", "id1", "beijing", "Beijing is capital of China", 1.0)]
    }

    #[test]
    fn test_transform_before_fit() {
        let result = preprocessor().transform(&single_pair(), Stage::Train);
        assert!(matches!(result, Err(PreprocessError::MissingContext)));
    }

    #[test]
    fn test_invalid_geometry_rejected_once() {
        let mut config = Config::default();
        config.preprocessor.text_length = Some(4);
        assert!(matches!(
            CdssmPreprocessor::new(config),
            Err(PreprocessError::ShapeInvariantViolation { .. })
        ));
    }

    #[test]
    fn test_fit_dims() {
        let mut pre = preprocessor();
        pre.fit(&single_pair(), Stage::Train).unwrap();
        let ctx = pre.context().unwrap();
        // beijing: 7 trigrams, capital: 7, china: 5
        assert_eq!(ctx.dims(), 20);
        assert_eq!(ctx.input_shapes(), [(5, 60), (5, 60)]);
        assert_eq!(ctx.vocabulary().index("#be"), 1);
    }

    #[test]
    fn test_left_tensor_values() {
        let mut pre = preprocessor();
        let pack = pre.fit_transform(&single_pair(), Stage::Train).unwrap();
        let left = pack.left_of("id0").unwrap();

        assert_eq!(left.dim(), (5, 60));
        // One token, pre-padded to the last row, which only the last window sees.
        assert_eq!(left.sum(), 7.0);
        assert_eq!(left.row(4).slice(ndarray::s![40..]).sum(), 7.0);
        assert_eq!(left.row(3).sum(), 0.0);
    }

    #[test]
    fn test_right_tensor_overlap() {
        let mut pre = preprocessor();
        let pack = pre.fit_transform(&single_pair(), Stage::Train).unwrap();
        let right = pack.right_of("id1").unwrap();
        // Rows of 7, 7 and 5 counts seen by 3, 2 and 1 windows.
        assert_eq!(right.sum(), 40.0);
    }

    #[test]
    fn test_post_padding_moves_content_first() {
        let mut config = Config::default();
        config.preprocessor.pad_mode = PadMode::Post;
        let mut pre = CdssmPreprocessor::new(config).unwrap();
        let pack = pre.fit_transform(&single_pair(), Stage::Train).unwrap();
        let left = pack.left_of("id0").unwrap();
        assert_eq!(left.row(0).slice(ndarray::s![..20]).sum(), 7.0);
        assert_eq!(left.sum(), 7.0);
    }

    #[test]
    fn test_truncation_sides() {
        let text = "alpha bravo charlie delta echo foxtrot golf hotel india juliett";
        let inputs = vec![TextPair::labeled("q", "d", "alpha", text, 0.0)];

        for (mode, kept) in [(TruncateMode::Pre, "juliett"), (TruncateMode::Post, "golf")] {
            let mut config = Config::default();
            config.preprocessor.truncate_mode = mode;
            let mut pre = CdssmPreprocessor::new(config).unwrap();
            let pack = pre.fit_transform(&inputs, Stage::Train).unwrap();
            let ctx = &pack.context;
            let dims = ctx.dims();
            let right = pack.right_of("d").unwrap();
            let last_row = right.row(4).slice(ndarray::s![2 * dims..]).to_vec();

            let index = ctx.vocabulary().index(&format!("#{}", &kept[..2]));
            assert!(index > 0);
            assert_eq!(last_row[index], 1.0, "truncate {mode} should keep {kept}");
        }
    }

    #[test]
    fn test_test_stage_oov() {
        let mut pre = preprocessor();
        pre.fit(&single_pair(), Stage::Train).unwrap();

        let test = vec![TextPair::unlabeled("id0", "id4", "beijing", "visited zzz")];
        let pack = pre.transform(&test, Stage::Test).unwrap();
        let right = pack.right_of("id4").unwrap();

        // visited: 7 unseen trigrams, zzz: 3 unseen trigrams.
        let last = right.row(4).to_vec();
        assert_eq!(last[20], 7.0);
        assert_eq!(last[40], 3.0);
        assert_eq!(right.sum(), 7.0 * 2.0 + 3.0);
    }

    #[test]
    fn test_refit_replaces_context() {
        let mut pre = preprocessor();
        pre.fit(&single_pair(), Stage::Train).unwrap();
        let first = Arc::clone(pre.context().unwrap());

        let other = vec![TextPair::labeled("a", "b", "xy", "xy", 1.0)];
        pre.fit(&other, Stage::Train).unwrap();
        let second = pre.context().unwrap();

        assert_eq!(first.dims(), 20);
        assert_eq!(second.dims(), 3);
    }

    #[test]
    fn test_failed_fit_keeps_previous_context() {
        let mut pre = preprocessor();
        pre.fit(&single_pair(), Stage::Train).unwrap();

        let bad = vec![TextPair::unlabeled("a", "b", "x", "y")];
        assert!(pre.fit(&bad, Stage::Train).is_err());
        assert_eq!(pre.context().unwrap().dims(), 20);
    }

    #[test]
    fn test_empty_corpus() {
        let mut pre = preprocessor();
        let pack = pre.fit_transform(&[], Stage::Train).unwrap();
        assert!(pack.is_empty());
        assert!(pack.context.is_degenerate());
        assert_eq!(pack.context.dims(), 1);

        let test = vec![TextPair::unlabeled("q", "d", "hello world", "")];
        let pack = pre.transform(&test, Stage::Test).unwrap();
        let left = pack.left_of("q").unwrap();
        assert_eq!(left.dim(), (5, 3));
        // hello and world: five trigrams each, all OOV.
        assert_eq!(left.row(4).to_vec(), vec![0.0, 5.0, 5.0]);
        assert_eq!(pack.right_of("d").unwrap().sum(), 0.0);
    }

    /// Hashes every token, then pads/truncates the flat sequence.
    fn flat_windows(pre: &CdssmPreprocessor, ctx: &ProcessingContext, text: &str) -> WindowTensor {
        let dims = ctx.dims();
        let hasher = TermHasher::new(ctx.vocabulary());
        let tokens = pre.normalizer.normalize(text);
        let mut flat = vec![0.0; tokens.len() * dims];
        for (token, row) in tokens.iter().zip(flat.chunks_exact_mut(dims)) {
            hasher.accumulate(&pre.ngram.transform_token(token), row);
        }

        let config = pre.config();
        let fixed = FixedLengthUnit::new(
            config.text_length() * dims,
            config.pad_value,
            config.pad_mode,
            config.truncate_mode,
        )
        .transform(flat);
        let rows = ArrayView2::from_shape((config.text_length(), dims), &fixed).unwrap();
        pre.slide.transform(rows)
    }

    #[test]
    fn test_row_truncation_matches_flat_normalization() {
        let train = vec![TextPair::labeled(
            "q",
            "d",
            "alpha bravo",
            "alpha bravo charlie delta echo foxtrot golf hotel india juliett",
            1.0,
        )];
        let long = "charlie unseen delta ".repeat(200);
        let texts = ["", "bravo", "alpha bravo charlie", long.as_str()];

        for pad_mode in [PadMode::Pre, PadMode::Post] {
            for truncate_mode in [TruncateMode::Pre, TruncateMode::Post] {
                let mut config = Config::default();
                config.preprocessor.pad_mode = pad_mode;
                config.preprocessor.truncate_mode = truncate_mode;
                config.preprocessor.pad_value = -1.0;
                let mut pre = CdssmPreprocessor::new(config).unwrap();
                pre.fit(&train, Stage::Train).unwrap();
                let ctx = Arc::clone(pre.context().unwrap());

                for text in texts {
                    assert_eq!(
                        pre.process_text(&ctx, text).unwrap(),
                        flat_windows(&pre, &ctx, text),
                        "pad {pad_mode}, truncate {truncate_mode}, {} chars",
                        text.len()
                    );
                }
            }
        }
    }

    #[test]
    fn test_long_text_keeps_edge_tokens() {
        let mut pre = preprocessor();
        pre.fit(&single_pair(), Stage::Train).unwrap();
        let ctx = Arc::clone(pre.context().unwrap());

        let text = format!("{}china", "capital ".repeat(50_000));
        let windows = pre.process_text(&ctx, &text).unwrap();
        assert_eq!(windows.dim(), (5, 60));

        // Pre truncation keeps the tail, so the last row is "china".
        let china = ctx.vocabulary().index("#ch");
        assert_eq!(windows[[4, 40 + china]], 1.0);
        assert_eq!(windows.row(4).slice(ndarray::s![40..]).sum(), 5.0);
    }
}
