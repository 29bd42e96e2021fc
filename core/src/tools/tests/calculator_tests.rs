use super::shared_llm;
use crate::llm::MockLlmClient;
use crate::tools::executors::CalculatorTool;
use crate::tools::{Tool, ToolError};

#[test]
fn test_process_expression_block() {
    let out = CalculatorTool::process_llm_output("```text\n12 * 7\n```\n...numexpr.evaluate(\"12 * 7\")...").unwrap();
    assert_eq!(out, "Answer: 84");
}

#[test]
fn test_process_passes_through_answer() {
    assert_eq!(CalculatorTool::process_llm_output("Answer: 4").unwrap(), "Answer: 4");
    assert_eq!(
        CalculatorTool::process_llm_output("The result is easy.\nAnswer: 10").unwrap(),
        "Answer: 10"
    );
}

#[test]
fn test_process_rejects_unknown_format() {
    let err = CalculatorTool::process_llm_output("I cannot help with that").unwrap_err();
    assert_eq!(err, ToolError::UnexpectedFormat("I cannot help with that".to_string()));
}

#[test]
fn test_process_reports_bad_expression() {
    let err = CalculatorTool::process_llm_output("```text\n12 * \n```").unwrap_err();
    assert!(matches!(err, ToolError::Expression(_)));
}

#[tokio::test]
async fn test_invoke_evaluates_translated_expression() {
    let (mock, llm) = shared_llm(MockLlmClient::new().with_text("```text\n12 * 7\n```"));
    let tool = CalculatorTool::new(llm);

    let answer = tool.invoke("12 * 7").await.unwrap();
    assert_eq!(answer, "Answer: 84");

    let prompt = mock.requests()[0].messages[0].content.clone().unwrap_or_default();
    assert!(prompt.ends_with("Question: 12 * 7\n"));
}

#[tokio::test]
async fn test_invoke_fractional_result() {
    let (_, llm) = shared_llm(MockLlmClient::new().with_text("```text\n7 / 2\n```"));
    let tool = CalculatorTool::new(llm);

    assert_eq!(tool.invoke("7 divided by 2").await.unwrap(), "Answer: 3.5");
}
