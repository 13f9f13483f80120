//! Property tests for the line accounting.

use proptest::prelude::*;
use rubymetrics::*;
use std::path::Path;

fn analyze_source(source: String) -> FileAnalysis {
    let scan = FileScan::from_content(source);
    analyze_content(Path::new("prop.rb"), &scan)
}

proptest! {
    #[test]
    fn prop_total_equals_sum_of_kinds(lines in prop::collection::vec("[ -~]{0,60}", 0..40)) {
        let analysis = analyze_source(lines.join("\n"));
        let counts = analysis.lines;
        prop_assert_eq!(counts.total, counts.code + counts.comment + counts.blank);
    }

    #[test]
    fn prop_complexity_has_base_one(lines in prop::collection::vec("[ -~]{0,60}", 0..40)) {
        let analysis = analyze_source(lines.join("\n"));
        prop_assert!(analysis.complexity >= 1);
    }

    #[test]
    fn prop_comment_ratio_bounded(lines in prop::collection::vec("[ -~]{0,60}", 0..40)) {
        let analysis = analyze_source(lines.join("\n"));
        let mut corpus = CorpusMetrics::default();
        corpus.absorb(&analysis);
        let ratio = corpus.comment_ratio();
        prop_assert!((0.0..=100.0).contains(&ratio));
    }

    #[test]
    fn prop_fold_is_order_independent_for_sums(
        a in prop::collection::vec("[ -~]{0,60}", 0..20),
        b in prop::collection::vec("[ -~]{0,60}", 0..20),
    ) {
        let first = analyze_source(a.join("\n"));
        let second = analyze_source(b.join("\n"));

        let mut forward = CorpusMetrics::default();
        forward.absorb(&first);
        forward.absorb(&second);

        let mut backward = CorpusMetrics::default();
        backward.absorb(&second);
        backward.absorb(&first);

        prop_assert_eq!(forward.lines, backward.lines);
        prop_assert_eq!(forward.total_complexity, backward.total_complexity);
        prop_assert_eq!(forward.max_nesting_depth, backward.max_nesting_depth);
    }
}
