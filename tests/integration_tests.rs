//! Integration tests for dialog-to-graph transformation
//!
//! These tests drive the public API end to end with realistic dialog documents.

use obi_graph::obi::strategy::StrategyKind;
use obi_graph::obi::{
    merge, normalize_step, DialogLoader, Edge, GraphNode, IndexedNode, NodeType, Transformer,
};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::collections::HashSet;

// ============================================================================
// Fixtures
// ============================================================================

/// A root dialog with a recognizer, grouped rules and a branching step list
static ROOT_DIALOG: Lazy<Value> = Lazy::new(|| {
    json!({
        "$type": "Microsoft.AdaptiveDialog",
        "recognizer": {
            "$type": "Microsoft.RegexRecognizer",
            "intents": { "Help": "help", "Cancel": "cancel" }
        },
        "rules": [
            { "$type": "Microsoft.WelcomeRule", "steps": ["greeting"] },
            { "$type": "Microsoft.IntentRule", "intent": "Help", "steps": ["help"] },
            { "$type": "Microsoft.IntentRule", "intent": "Cancel", "steps": ["cancel"] },
            { "$type": "Microsoft.NoMatchRule", "steps": ["fallback"] }
        ],
        "steps": [
            { "$type": "Microsoft.SendActivity", "activity": "hi" },
            "child"
        ]
    })
});

/// Steps only, with an if/else in the middle
static BRANCHING_DIALOG: Lazy<Value> = Lazy::new(|| {
    json!({
        "$type": "Microsoft.AdaptiveDialog",
        "steps": [
            { "$type": "Microsoft.SendActivity", "activity": "X" },
            {
                "$type": "Microsoft.IfCondition",
                "condition": "user.age > 18",
                "ifTrue": [{ "$type": "Microsoft.SendActivity", "activity": "Y" }],
                "ifFalse": [{ "$type": "Microsoft.SendActivity", "activity": "Z" }]
            },
            { "$type": "Microsoft.SendActivity", "activity": "W" }
        ]
    })
});

fn transform(doc: &Value) -> Vec<GraphNode> {
    Transformer::new().to_graph_schema(Some(doc)).unwrap()
}

fn find<'a>(graph: &'a [GraphNode], id: &str) -> &'a GraphNode {
    graph
        .iter()
        .find(|n| n.id == id)
        .unwrap_or_else(|| panic!("no node {}", id))
}

fn strategy_for(doc: &Value) -> Option<StrategyKind> {
    Transformer::new().choose_strategy(Some(doc)).map(|s| s.kind())
}

// ============================================================================
// Determinism and null safety
// ============================================================================

#[test]
fn test_transform_is_deterministic() {
    for doc in [&*ROOT_DIALOG, &*BRANCHING_DIALOG] {
        let first = serde_json::to_string(&transform(doc)).unwrap();
        let second = serde_json::to_string(&transform(doc)).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_null_input_is_empty_graph() {
    let transformer = Transformer::new();
    assert!(transformer.to_graph_schema(None).unwrap().is_empty());
    assert!(transformer.to_graph_schema(Some(&Value::Null)).unwrap().is_empty());
}

#[test]
fn test_input_is_not_mutated() {
    let doc = BRANCHING_DIALOG.clone();
    let _ = transform(&doc);
    assert_eq!(doc, *BRANCHING_DIALOG);
}

// ============================================================================
// Strategy dispatch
// ============================================================================

#[test]
fn test_strategy_dispatch_examples() {
    let recognizer = json!({ "$type": "Microsoft.RegexRecognizer" });

    assert_eq!(
        strategy_for(&json!({ "recognizer": recognizer, "rules": [], "steps": [] })),
        Some(StrategyKind::Graphical)
    );
    assert_eq!(
        strategy_for(&json!({
            "recognizer": recognizer,
            "rules": [{ "$type": "Microsoft.IntentRule" }],
            "steps": ["s"]
        })),
        Some(StrategyKind::RootDialog)
    );
    assert_eq!(
        strategy_for(&json!({ "recognizer": null, "rules": [], "steps": ["s"] })),
        Some(StrategyKind::Sequential)
    );
    assert_eq!(strategy_for(&ROOT_DIALOG), Some(StrategyKind::RootDialog));
    assert_eq!(strategy_for(&BRANCHING_DIALOG), Some(StrategyKind::Sequential));
}

#[test]
fn test_trigger_era_document() {
    let doc = json!({
        "recognizer": { "$type": "Microsoft.RegexRecognizer" },
        "triggers": [
            { "$type": "Microsoft.OnConversationUpdateActivity" },
            { "$type": "Microsoft.OnIntent", "intent": "Help" },
            { "$type": "Microsoft.OnUnknownIntent" }
        ],
        "actions": ["child"]
    });
    assert_eq!(strategy_for(&doc), Some(StrategyKind::RootDialog));

    let graph = transform(&doc);
    let events = find(&graph, "$.eventGroup");
    assert_eq!(events.payload["children"][0]["id"], "$.triggers[0]");
    assert_eq!(events.payload["children"][1]["id"], "$.triggers[2]");
    assert_eq!(find(&graph, "$.actions[0]").node_type, NodeType::Process);
}

// ============================================================================
// Sequential chaining and branch flattening
// ============================================================================

#[test]
fn test_sequential_chaining() {
    let graph = transform(&json!({ "steps": ["A", "B", "C"] }));

    assert_eq!(graph.len(), 3);
    assert_eq!(graph[0].neighbor_ids, vec!["$.steps[1]"]);
    assert_eq!(graph[1].neighbor_ids, vec!["$.steps[2]"]);
    assert!(graph[2].neighbor_ids.is_empty());
}

#[test]
fn test_if_else_flattening() {
    let graph = transform(&BRANCHING_DIALOG);

    let x = find(&graph, "$.steps[0]");
    let if_step = find(&graph, "$.steps[1]");
    let y = find(&graph, "$.steps[1].ifTrue[0]");
    let z = find(&graph, "$.steps[1].ifFalse[0]");
    let w = find(&graph, "$.steps[2]");

    assert_eq!(x.neighbor_ids, vec!["$.steps[1]"]);
    assert_eq!(if_step.node_type, NodeType::Decision);
    assert_eq!(if_step.neighbor_ids, vec![y.id.clone(), z.id.clone()]);
    assert!(!if_step.neighbor_ids.contains(&w.id));
    assert_eq!(y.neighbor_ids, vec!["$.steps[2]"]);
    assert_eq!(z.neighbor_ids, vec!["$.steps[2]"]);
    assert!(w.neighbor_ids.is_empty());
    assert_eq!(y.payload["activity"], "Y");
}

#[test]
fn test_empty_branches_pass_through() {
    let graph = transform(&json!({
        "steps": [
            { "$type": "Microsoft.IfCondition", "ifTrue": [], "ifFalse": [] },
            "after"
        ]
    }));
    assert_eq!(graph.len(), 2);
    assert_eq!(graph[0].neighbor_ids, vec!["$.steps[1]"]);

    let terminal = transform(&json!({
        "steps": [{ "$type": "Microsoft.IfCondition", "ifTrue": [], "ifFalse": [] }]
    }));
    assert_eq!(terminal.len(), 1);
    assert!(terminal[0].neighbor_ids.is_empty());
}

#[test]
fn test_nested_branches_two_levels() {
    let inner = |tag: &str| {
        json!({
            "$type": "Microsoft.IfCondition",
            "ifTrue": [format!("{}-yes", tag)],
            "ifFalse": [format!("{}-no", tag)]
        })
    };
    let graph = transform(&json!({
        "steps": [
            {
                "$type": "Microsoft.IfCondition",
                "ifTrue": [inner("a")],
                "ifFalse": [inner("b")]
            },
            "end"
        ]
    }));

    let ids: Vec<&str> = graph.iter().map(|n| n.id.as_str()).collect();
    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(ids.len(), unique.len());
    assert_eq!(ids.len(), 2 + 2 + 4);

    for side in ["ifTrue", "ifFalse"] {
        let inner_id = format!("$.steps[0].{}[0]", side);
        let inner_node = find(&graph, &inner_id);
        assert_eq!(inner_node.node_type, NodeType::Decision);
        assert_eq!(
            inner_node.neighbor_ids,
            vec![format!("{}.ifTrue[0]", inner_id), format!("{}.ifFalse[0]", inner_id)]
        );
        for leaf in &inner_node.neighbor_ids {
            assert_eq!(find(&graph, leaf).neighbor_ids, vec!["$.steps[1]"]);
        }
    }

    // every edge target exists
    for node in &graph {
        for neighbor in &node.neighbor_ids {
            assert!(unique.contains(neighbor.as_str()));
        }
    }
}

// ============================================================================
// Root dialog grouping
// ============================================================================

#[test]
fn test_root_dialog_grouping() {
    let graph = transform(&ROOT_DIALOG);

    let recognizer = find(&graph, "$.recognizer");
    assert_eq!(recognizer.node_type, NodeType::Decision);
    assert_eq!(recognizer.neighbor_ids, vec!["$.eventGroup"]);

    let events = find(&graph, "$.eventGroup");
    assert_eq!(events.node_type, NodeType::Group);
    assert_eq!(events.neighbor_ids, vec!["$.intentGroup"]);
    let event_types: Vec<&str> = events.payload["children"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["payload"]["$type"].as_str())
        .collect();
    assert_eq!(event_types, vec!["Microsoft.WelcomeRule", "Microsoft.NoMatchRule"]);

    let intents = find(&graph, "$.intentGroup");
    let intent_names: Vec<&str> = intents.payload["children"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["payload"]["intent"].as_str())
        .collect();
    assert_eq!(intent_names, vec!["Help", "Cancel"]);

    assert_eq!(find(&graph, "$.steps[0]").neighbor_ids, vec!["$.steps[1]"]);
}

// ============================================================================
// Normalization and merge
// ============================================================================

#[test]
fn test_step_normalization() {
    let step = json!({ "$type": "Microsoft.SendActivity", "activity": "hello" });
    assert_eq!(normalize_step(&step), step);
    assert_eq!(
        normalize_step(&json!("x")),
        json!({ "$type": "BeginDialog", "dialog": { "$ref": "x" } })
    );
}

#[test]
fn test_merge_keeps_duplicate_edges() {
    let nodes = vec![
        IndexedNode::new("A", NodeType::Process, json!({})),
        IndexedNode::new("B", NodeType::Process, json!({})),
    ];
    let graph = merge(nodes, &[Edge::new("A", "B"), Edge::new("A", "B")]).unwrap();
    assert_eq!(graph[0].neighbor_ids, vec!["B", "B"]);
}

#[test]
fn test_output_shape() {
    let graph = transform(&json!({ "steps": ["only"] }));
    let value = serde_json::to_value(&graph).unwrap();
    assert_eq!(
        value,
        json!([{
            "id": "$.steps[0]",
            "type": "Process",
            "neighborIds": [],
            "payload": { "$type": "BeginDialog", "dialog": { "$ref": "only" } }
        }])
    );
}

// ============================================================================
// Loading from disk
// ============================================================================

#[test]
fn test_yaml_and_json_dialogs_agree() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("main.dialog");
    let yaml_path = dir.path().join("main.yaml");
    std::fs::write(&json_path, serde_json::to_string(&*BRANCHING_DIALOG).unwrap()).unwrap();
    std::fs::write(&yaml_path, serde_yaml::to_string(&*BRANCHING_DIALOG).unwrap()).unwrap();

    let loader = DialogLoader::new();
    let from_json = transform(&loader.load_dialog(&json_path).unwrap());
    let from_yaml = transform(&loader.load_dialog(&yaml_path).unwrap());
    assert_eq!(from_json, from_yaml);
    assert_eq!(from_json.len(), 5);
}
