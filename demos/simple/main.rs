use std::sync::Arc;

use approflow::{Config, FlowEditor, FlowGraph, FlowModel, MemStore, StepStore};

fn main() {
    let text = include_str!("./flow.json");

    let model = FlowModel::from_json(text).unwrap();
    let graph = FlowGraph::try_from(&model).unwrap();
    println!("{}", graph.schema());

    let store = Arc::new(MemStore::new());
    let mut editor = FlowEditor::open(store.clone(), "purchase-approval", &Config::default()).unwrap();
    editor.replace_graph(graph);

    match editor.save() {
        Ok(result) => {
            println!("\nFlow saved, warnings: {:?}", result.warnings);
        }
        Err(e) => {
            println!("\nFlow rejected: {}", e);
            return;
        }
    }

    let steps = store.load_steps("purchase-approval").unwrap();
    println!("Stored steps: {}", serde_json::to_string_pretty(&steps).unwrap());

    // the stored list has no branches, so the reopened flow is a plain chain
    let reopened = FlowEditor::open(store, "purchase-approval", &Config::default()).unwrap();
    println!("\n{}", reopened.graph().schema());
}
