use anyhow::Result;
use promptforge_cli::cli::run_with_args;
use promptforge_core::PromptForgeError;
use serde_json::json;
use tempfile::TempDir;

use std::fs;
use std::path::PathBuf;

const PROMPT: &str = "Goal: Determine engagement. Context: clickstream data.";

fn write_file(dir: &TempDir, name: &str, content: &str) -> Result<String> {
    let path: PathBuf = dir.path().join(name);
    fs::write(&path, content)?;
    Ok(path.to_string_lossy().into_owned())
}

#[tokio::test]
async fn generate_with_validation_and_render() -> Result<()> {
    let output = run_with_args([
        "promptforge",
        "generate",
        "--prompt",
        PROMPT,
        "--with-validation",
        "--render",
    ])
    .await?;

    let goal = output["chain"]["goal"].as_str().unwrap_or_default();
    assert!(goal.contains("Determine engagement"));
    assert_eq!(output["validation"]["valid"], json!(true));
    assert_eq!(output["cycles"], json!([]));

    let rendered = output["rendered"].as_str().unwrap_or_default();
    assert!(rendered.starts_with("Reasoning toward: Determine engagement\n1. [premise] "));

    let steps = output["chain"]["steps"].as_array().map(Vec::len).unwrap_or(0);
    let reasoning = output["reasoning"].as_array().map(Vec::len).unwrap_or(0);
    assert!(steps >= 4);
    assert_eq!(steps, reasoning);
    Ok(())
}

#[tokio::test]
async fn generate_plain_omits_optional_sections() -> Result<()> {
    let output = run_with_args(["promptforge", "generate", "--prompt", PROMPT]).await?;
    assert!(output.get("validation").is_none());
    assert!(output.get("cycles").is_none());
    assert!(output.get("rendered").is_none());
    Ok(())
}

#[tokio::test]
async fn generate_reads_prompt_template_and_config_files() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let prompt = write_file(&dir, "prompt.txt", "Summarize the quarter for the board.")?;
    let template = write_file(
        &dir,
        "template.yaml",
        "name: board\ndescription: Brief the board\ncontent: Quarterly numbers\n",
    )?;
    let config = write_file(&dir, "chain.yaml", "maxSteps: 4\nverbosity: minimal\n")?;

    let output = run_with_args([
        "promptforge",
        "generate",
        "--prompt-file",
        prompt.as_str(),
        "--template",
        template.as_str(),
        "--config",
        config.as_str(),
    ])
    .await?;

    assert_eq!(output["chain"]["goal"], json!("Brief the board"));
    assert_eq!(output["chain"]["context"], json!("Quarterly numbers"));
    let steps = output["chain"]["steps"].as_array().map(Vec::len).unwrap_or(0);
    assert!(steps <= 4);
    Ok(())
}

#[tokio::test]
async fn overrides_win_over_config_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = write_file(&dir, "chain.json", r#"{"maxSteps": 10}"#)?;

    let output = run_with_args([
        "promptforge",
        "generate",
        "--prompt",
        PROMPT,
        "--config",
        config.as_str(),
        "-o",
        "max_steps=2",
    ])
    .await?;

    let steps = output["chain"]["steps"].as_array().map(Vec::len).unwrap_or(0);
    assert_eq!(steps, 2);
    Ok(())
}

#[tokio::test]
async fn bad_overrides_are_rejected() {
    let malformed =
        run_with_args(["promptforge", "generate", "--prompt", PROMPT, "-o", "maxSteps"]).await;
    assert!(malformed.is_err());

    let unknown =
        run_with_args(["promptforge", "generate", "--prompt", PROMPT, "-o", "colour=red"]).await;
    let message = unknown.err().map(|e| e.to_string()).unwrap_or_default();
    assert!(message.contains("unknown configuration key 'colour'"));

    let invalid =
        run_with_args(["promptforge", "generate", "--prompt", PROMPT, "-o", "minConfidence=1.5"])
            .await;
    assert!(invalid.is_err());
}

#[tokio::test]
async fn optimize_collapses_duplicates_from_step_list() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let chain = write_file(
        &dir,
        "steps.json",
        r#"[
            {"id": "1", "content": "Given: Initial data", "type": "premise", "confidence": 1.0},
            {"id": "2", "content": "Given: Initial data", "type": "premise", "confidence": 1.0}
        ]"#,
    )?;

    let output = run_with_args(["promptforge", "optimize", "--chain", chain.as_str()]).await?;
    assert_eq!(output["steps"].as_array().map(Vec::len), Some(1));
    assert_eq!(output["cycles"], json!([]));
    Ok(())
}

#[tokio::test]
async fn optimize_reports_cycles_from_yaml_chain() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let chain = write_file(
        &dir,
        "chain.yaml",
        r#"goal: Plan stock
steps:
  - id: a
    content: Estimate demand for coats
    type: inference
    confidence: 0.7
    dependencies: [c]
  - id: b
    content: Compare supplier lead times
    type: inference
    confidence: 0.7
    dependencies: [a]
  - id: c
    content: Check warehouse capacity
    type: inference
    confidence: 0.7
    dependencies: [b]
"#,
    )?;

    let output = run_with_args(["promptforge", "optimize", "--chain", chain.as_str()]).await?;
    assert_eq!(output["steps"].as_array().map(Vec::len), Some(3));
    assert!(output["cycles"].as_array().map(|c| !c.is_empty()).unwrap_or(false));
    Ok(())
}

#[tokio::test]
async fn validate_flags_missing_dependency() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let chain = write_file(
        &dir,
        "chain.json",
        r#"{"goal": "g", "context": "c", "steps": [
            {"id": "only", "content": "Derive the floor", "type": "inference",
             "confidence": 0.8, "dependencies": ["ghost"]}
        ]}"#,
    )?;

    let output = run_with_args(["promptforge", "validate", "--chain", chain.as_str()]).await?;
    assert_eq!(output["valid"], json!(false));
    assert_eq!(output["issues"][0]["type"], json!("missing_connection"));
    assert_eq!(output["issues"][0]["severity"], json!("high"));
    Ok(())
}

#[tokio::test]
async fn unreadable_chain_is_an_error() {
    let result =
        run_with_args(["promptforge", "validate", "--chain", "/nonexistent/chain.json"]).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn malformed_chain_files_report_parse_errors() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let json = write_file(&dir, "broken.json", "{\"steps\": [")?;
    let yaml = write_file(&dir, "broken.yaml", "steps: [unclosed")?;

    let json_err = run_with_args(["promptforge", "validate", "--chain", json.as_str()])
        .await
        .err()
        .map(|e| e.downcast_ref::<PromptForgeError>().map(|e| e.to_string()));
    let json_err = json_err.flatten().unwrap_or_default();
    assert!(json_err.starts_with("JSON error:"), "{}", json_err);

    let yaml_err = run_with_args(["promptforge", "optimize", "--chain", yaml.as_str()])
        .await
        .err()
        .map(|e| e.downcast_ref::<PromptForgeError>().map(|e| e.to_string()));
    let yaml_err = yaml_err.flatten().unwrap_or_default();
    assert!(yaml_err.starts_with("YAML error:"), "{}", yaml_err);
    Ok(())
}

#[tokio::test]
async fn pattern_expands_named_archetype() -> Result<()> {
    let output =
        run_with_args(["promptforge", "pattern", "Analogical", "Shops are like gardens"]).await?;
    assert_eq!(output["steps"].as_array().map(Vec::len), Some(4));
    assert_eq!(output["steps"][1]["type"], json!("mapping"));
    assert_eq!(output["effectiveness"], json!(0.75));

    let unknown = run_with_args(["promptforge", "pattern", "lateral", "x"]).await;
    assert!(unknown.is_err());
    Ok(())
}

#[tokio::test]
async fn models_lists_profiles() -> Result<()> {
    let output = run_with_args(["promptforge", "models"]).await?;
    assert_eq!(output["gpt-4"]["maxSteps"], json!(10));
    assert_eq!(output["gpt-3.5-turbo"]["requiresExplicit"], json!(true));
    assert_eq!(output["claude-3-opus"]["preferredStyle"], json!("hierarchical"));
    assert_eq!(output.as_object().map(|m| m.len()), Some(5));
    Ok(())
}
