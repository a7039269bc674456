//! Tests for the emission driver, prompt synthesis, and artifact output.
mod common;
use common::*;
use reqgraph::prelude::*;
use std::fs;

/// Records the order of calls and returns a marker block per node.
fn recording_synthesizer(
    calls: &mut Vec<String>,
) -> impl FnMut(&SynthesisRequest<'_>) -> std::result::Result<String, SynthesisError> + '_ {
    synthesizer_fn(move |request| {
        calls.push(request.node_id.to_string());
        Ok(format!("def call_{}():\n    pass", request.node_id))
    })
}

#[test]
fn test_emit_follows_post_order() {
    let graph = create_diamond_graph();
    let driver = EmissionDriver::builder(&graph).build();

    let mut calls = Vec::new();
    let code = driver
        .emit(&mut recording_synthesizer(&mut calls))
        .expect("Emission failed");

    assert_eq!(calls, vec!["C", "B", "A"]);
    assert_eq!(code.node_ids().collect::<Vec<_>>(), vec!["C", "B", "A"]);
    assert_eq!(driver.plan(), vec!["C", "B", "A"]);
}

#[test]
fn test_emit_invokes_each_node_once_with_cycles() {
    let graph = create_cyclic_graph();
    let driver = EmissionDriver::builder(&graph).build();

    let mut calls = Vec::new();
    driver.emit(&mut recording_synthesizer(&mut calls)).unwrap();

    assert_eq!(calls, vec!["C", "B", "A", "S"]);
}

#[test]
fn test_emit_passes_node_attributes() {
    let graph = create_login_graph();
    let driver = EmissionDriver::builder(&graph).build();

    let mut seen = Vec::new();
    let mut synthesizer = synthesizer_fn(|request| {
        if request.node_id == "orders" {
            seen.push((
                request.node_type.to_string(),
                request.signature.to_string(),
                request.response.to_string(),
                request.dynamic_parts.to_vec(),
                request.extracted_parts.to_vec(),
                request.input_variables.to_vec(),
            ));
        }
        Ok(String::new())
    });
    driver.emit(&mut synthesizer).unwrap();

    assert_eq!(seen.len(), 1);
    let (node_type, signature, response, dynamic, extracted, inputs) = &seen[0];
    assert_eq!(node_type, "master");
    assert_eq!(signature, "curl https://api.example.com/orders");
    assert_eq!(response, "{\"from\": \"orders\"}");
    assert_eq!(dynamic, &vec!["token".to_string(), "user_id".to_string()]);
    assert!(extracted.is_empty());
    assert_eq!(inputs, &vec!["search_term".to_string()]);
}

#[test]
fn test_emit_aborts_on_first_failure() {
    let graph = create_diamond_graph();
    let driver = EmissionDriver::builder(&graph).build();

    let mut calls = Vec::new();
    let mut synthesizer = synthesizer_fn(|request| {
        calls.push(request.node_id.to_string());
        if request.node_id == "B" {
            Err(SynthesisError::Model("rate limited".to_string()))
        } else {
            Ok("code".to_string())
        }
    });
    let result = driver.emit(&mut synthesizer);

    assert_eq!(calls, vec!["C", "B"]);
    match result {
        Err(EmitError::Synthesis { node_id, source }) => {
            assert_eq!(node_id, "B");
            assert!(source.to_string().contains("rate limited"));
        }
        other => panic!("Expected synthesis failure, got {:?}", other),
    }
}

#[test]
fn test_emit_respects_depth_and_direction() {
    let graph = graph_of(
        &["login", "profile", "orders"],
        &[("login", "profile"), ("profile", "orders")],
    );

    let upstream = EmissionDriver::builder(&graph)
        .direction(Direction::Upstream)
        .build();
    assert_eq!(upstream.plan(), vec!["login", "profile", "orders"]);

    let limited = EmissionDriver::builder(&graph).max_depth(Some(2)).build();
    assert_eq!(limited.plan(), vec!["profile", "login"]);
}

#[test]
fn test_generated_code_render_separates_blocks() {
    let graph = create_disconnected_graph();
    let driver = EmissionDriver::builder(&graph).build();
    let code = driver
        .emit(&mut synthesizer_fn(|request| Ok(format!("# {}", request.node_id))))
        .unwrap();

    assert_eq!(code.render(), "# S1\n\n# T\n\n# S2\n\n");
    assert_eq!(code.len(), 3);
    assert!(code.blocks[1].label.contains("[node_id: T]"));
}

#[test]
fn test_empty_graph_emits_nothing() {
    let graph = RequestGraph::default();
    let code = EmissionDriver::builder(&graph)
        .build()
        .emit(&mut synthesizer_fn(|_| Ok("unreachable".to_string())))
        .unwrap();

    assert!(code.is_empty());
    assert_eq!(code.render(), "");
}

#[test]
fn test_save_overwrites_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("generated_code.txt");
    let graph = create_diamond_graph();
    let driver = EmissionDriver::builder(&graph).build();

    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "stale content from a previous run").unwrap();

    let code = driver
        .emit(&mut synthesizer_fn(|request| Ok(request.node_id.to_string())))
        .unwrap();
    code.save(&path).expect("Failed to save artifact");

    assert_eq!(fs::read_to_string(&path).unwrap(), "C\n\nB\n\nA\n\n");
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("code.txt");

    GeneratedCode::default().save(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_prompt_contains_request_details() {
    let graph = create_login_graph();
    let node = graph.node("orders").unwrap();
    let prompt = CodePrompt::default().render(&SynthesisRequest::from_node("orders", node));

    assert!(prompt.contains("Write me a python function"));
    assert!(prompt.contains("curl https://api.example.com/orders"));
    assert!(prompt.contains("['token', 'user_id']"));
    assert!(prompt.contains("The response is below:\n{\"from\": \"orders\"}"));
    assert!(prompt.contains(
        "Assume these variables below are provided by the user:\n['search_term']"
    ));
    assert!(prompt.contains("cookie_string"));
    assert!(prompt.contains("Remove any 'priority' headers."));
}

#[test]
fn test_prompt_omits_oversized_response() {
    let mut node = request("big");
    node.content.value = "x".repeat(50);
    node.extracted_parts = vec!["cursor".to_string()];

    let prompt = CodePrompt::new(10).render(&SynthesisRequest::from_node("big", &node));

    assert!(!prompt.contains("xxxxxxxxxx"));
    assert!(prompt.contains("# parse out the variables ['cursor'] from the response"));
    assert!(!prompt.contains("provided by the user"));
}

#[test]
fn test_prompt_language_is_configurable() {
    let node = request("a");
    let prompt = CodePrompt::default()
        .with_language("rust")
        .render(&SynthesisRequest::from_node("a", &node));
    assert!(prompt.contains("Write me a rust function"));
    assert!(prompt.contains("Only output the rust script"));
}

#[test]
fn test_prompt_synthesizer_trims_model_output() {
    struct PaddedModel(Vec<String>);

    impl LanguageModel for PaddedModel {
        fn invoke(&mut self, prompt: &str) -> std::result::Result<String, SynthesisError> {
            self.0.push(prompt.to_string());
            Ok("\n\n  def fetch():\n      pass  \n".to_string())
        }
    }

    let graph = create_diamond_graph();
    let mut synthesizer = PromptSynthesizer::new(PaddedModel(Vec::new()));
    let code = EmissionDriver::builder(&graph)
        .build()
        .emit(&mut synthesizer)
        .unwrap();

    assert_eq!(synthesizer.model.0.len(), 3);
    assert_eq!(code.blocks[0].code, "def fetch():\n      pass");
}

#[test]
fn test_echo_model_returns_prompt() {
    let graph = create_diamond_graph();
    let code = EmissionDriver::builder(&graph)
        .build()
        .emit(&mut PromptSynthesizer::new(EchoModel))
        .unwrap();

    assert!(code.blocks[0].code.starts_with("Task:"));
    assert!(code.blocks[0].code.contains("curl https://api.example.com/C"));
}

#[cfg(unix)]
#[test]
fn test_command_model_pipes_prompt() {
    let mut model = CommandModel::from_command_line(&["cat".to_string()]).unwrap();
    assert_eq!(model.invoke("print('hi')").unwrap(), "print('hi')");
}

#[cfg(unix)]
#[test]
fn test_command_model_streams_large_prompt() {
    let prompt = "x".repeat(1_000_000);
    let expected = prompt.clone();
    let (tx, rx) = std::sync::mpsc::channel();

    std::thread::spawn(move || {
        let _ = tx.send(CommandModel::new("cat").invoke(&prompt));
    });

    let output = rx
        .recv_timeout(std::time::Duration::from_secs(30))
        .expect("CommandModel did not finish on a large prompt")
        .expect("cat failed");
    assert_eq!(output.len(), expected.len());
    assert!(output == expected);
}

#[cfg(unix)]
#[test]
fn test_command_model_reports_failure() {
    let command = vec!["sh".to_string(), "-c".to_string(), "exit 3".to_string()];
    let mut model = CommandModel::from_command_line(&command).unwrap();
    match model.invoke("prompt") {
        Err(SynthesisError::Command { program, .. }) => assert_eq!(program, "sh"),
        other => panic!("Expected command failure, got {:?}", other),
    }
}

#[test]
fn test_command_model_missing_program() {
    let mut model = CommandModel::new("reqgraph-definitely-not-a-real-program");
    assert!(matches!(
        model.invoke("prompt"),
        Err(SynthesisError::Command { .. })
    ));
    assert!(CommandModel::from_command_line(&[]).is_none());
}
