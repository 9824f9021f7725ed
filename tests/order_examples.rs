// tests/order_examples.rs

use std::error::Error;

use stepdag::dag::{topological_order, validate_order};
use stepdag::errors::StepdagError;
use stepdag::input::LineInput;
use stepdag::{format_order, solve_order};
use stepdag_test_utils::builders::{requirement_lines, GraphBuilder, REFERENCE_EDGES};
use stepdag_test_utils::{init_tracing, with_timeout, DEFAULT_TEST_TIMEOUT};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn reference_input_orders_cabdfe() -> TestResult {
    with_timeout(DEFAULT_TEST_TIMEOUT, async {
        init_tracing();

        let text = requirement_lines(&REFERENCE_EDGES);
        let mut input = LineInput::new(text.as_bytes());

        let order = solve_order(&mut input, false).await?;
        assert_eq!(format_order(&order), "Step order: CABDFE");

        TestResult::Ok(())
    })
    .await
}

#[tokio::test]
async fn malformed_line_aborts_without_partial_result() -> TestResult {
    with_timeout(DEFAULT_TEST_TIMEOUT, async {
        init_tracing();

        let text = format!(
            "{}Step B must finish before step C can begin.\n",
            requirement_lines(&[("A", "B")])
        );
        let mut input = LineInput::new(text.as_bytes());

        match solve_order(&mut input, false).await {
            Err(StepdagError::Parse {
                line_no,
                line,
                reason,
            }) => {
                assert_eq!(line_no, 2);
                assert!(line.contains("must finish before"));
                assert_eq!(reason, "requirement");
            }
            other => panic!("expected parse error, got {other:?}"),
        }

        TestResult::Ok(())
    })
    .await
}

#[tokio::test]
async fn two_task_cycle_reports_no_valid_ordering() -> TestResult {
    with_timeout(DEFAULT_TEST_TIMEOUT, async {
        init_tracing();

        let text = requirement_lines(&[("A", "B"), ("B", "A")]);
        let mut input = LineInput::new(text.as_bytes());

        let err = solve_order(&mut input, false).await.unwrap_err();
        assert!(matches!(err, StepdagError::NoValidOrdering { .. }));
        assert!(err.to_string().contains("no valid ordering"));

        TestResult::Ok(())
    })
    .await
}

#[test]
fn independent_tasks_break_ties_alphabetically() {
    let g = GraphBuilder::new().task("B").task("A").build();
    assert_eq!(topological_order(&g).unwrap(), ["A", "B"]);
}

#[test]
fn produced_order_passes_validator() {
    let g = GraphBuilder::new()
        .edges(&REFERENCE_EDGES)
        .before("E", "G")
        .before("X", "G")
        .build();
    let order = topological_order(&g).unwrap();
    assert_eq!(order.concat(), "CABDFEXG");
    assert!(validate_order(&g, &order).is_ok());
}
