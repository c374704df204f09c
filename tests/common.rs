//! Common test utilities: a small lab catalog and canvas helpers.
use benchflow::prelude::*;
use benchflow::graph::IdScheme;
use serde_json::json;

/// A catalog with five services:
///
/// `pcr -> {dpn1, run-gel}`, `dpn1 -> run-gel`, `run-gel -> gel-extraction`,
/// `gel-extraction -> {sequencing, retired-service}`, `sequencing -> {}`.
///
/// `retired-service` does not exist.
#[allow(dead_code)]
pub const LAB_CATALOG_JSON: &str = r#"{
    "services": [
        {
            "id": "pcr",
            "name": "PCR",
            "parameters": [
                { "id": "template", "name": "Template", "dataType": "string" },
                { "id": "primers", "name": "Primers", "dataType": "string" },
                { "id": "cycles", "name": "Cycles", "dataType": "number", "required": false }
            ],
            "allowedConnections": ["dpn1", "run-gel"],
            "icon": "pcr.svg",
            "description": "Polymerase chain reaction"
        },
        {
            "id": "dpn1",
            "name": "DpnI Digest",
            "parameters": [
                { "id": "product", "name": "PCR Product", "kind": "result" },
                { "id": "enzyme-lot", "name": "Enzyme Lot", "required": false }
            ],
            "allowedConnections": ["run-gel"]
        },
        {
            "id": "run-gel",
            "name": "Run Gel",
            "parameters": [
                { "id": "sample", "name": "Sample", "kind": "result" },
                { "id": "gel-percent", "name": "Gel %", "dataType": "dropdown", "options": ["1%", "2%"] }
            ],
            "allowedConnections": ["gel-extraction"]
        },
        {
            "id": "gel-extraction",
            "name": "Gel Extraction",
            "parameters": [
                { "id": "band", "name": "Band", "kind": "result" }
            ],
            "allowedConnections": ["sequencing", "retired-service"]
        },
        {
            "id": "sequencing",
            "name": "Sanger Sequencing",
            "parameters": [
                { "id": "sample", "name": "Sample", "kind": "result" },
                { "id": "primer", "name": "Sequencing Primer" }
            ]
        }
    ],
    "bundles": [
        { "id": "cloning", "name": "Cloning", "serviceIds": ["pcr", "dpn1", "run-gel"] },
        { "id": "verify", "name": "Verify", "serviceIds": ["pcr", "run-gel", "gel-extraction", "sequencing"] },
        { "id": "backwards", "name": "Backwards", "serviceIds": ["sequencing", "pcr"] }
    ]
}"#;

#[allow(dead_code)]
pub fn lab_catalog() -> Catalog {
    Catalog::from_json(LAB_CATALOG_JSON).expect("lab catalog must parse")
}

/// Default config, but with deterministic ids.
#[allow(dead_code)]
pub fn test_config() -> EngineConfig {
    EngineConfig::default().with_id_scheme(IdScheme::Sequential)
}

#[allow(dead_code)]
pub fn empty_canvas() -> Canvas {
    Canvas::new(IdScheme::Sequential)
}

/// A bare node with no parameters.
#[allow(dead_code)]
pub fn node(id: &str, service_id: &str) -> Node {
    Node {
        id: id.to_string(),
        service_id: service_id.to_string(),
        label: String::new(),
        position: Position::default(),
        form_data: Vec::new(),
        additional_instructions: None,
    }
}

#[allow(dead_code)]
pub fn edge(id: &str, source: &str, target: &str) -> Edge {
    Edge::new(id, source, target)
}

/// Node ids of each workflow.
#[allow(dead_code)]
pub fn chain_ids(workflows: &[Workflow<'_>]) -> Vec<Vec<String>> {
    workflows
        .iter()
        .map(|chain| chain.iter().map(|n| n.id.clone()).collect())
        .collect()
}

/// Service ids of each workflow.
#[allow(dead_code)]
pub fn chain_services(workflows: &[Workflow<'_>]) -> Vec<Vec<String>> {
    workflows
        .iter()
        .map(|chain| chain.iter().map(|n| n.service_id.clone()).collect())
        .collect()
}

/// A canvas `pcr -> dpn1 -> run-gel` with every required field filled in.
#[allow(dead_code)]
pub fn filled_cloning_canvas() -> Canvas {
    let catalog = lab_catalog();
    let config = test_config();
    let mut canvas = empty_canvas();
    let ids = GraphBuilder::new(&catalog, &config)
        .add_chain_from_service_ids(&mut canvas, &strings(&["pcr", "dpn1", "run-gel"]))
        .expect("cloning chain is legal");
    canvas
        .set_field_value(&ids[0], "template", json!("pUC19"))
        .unwrap();
    canvas
        .set_field_value(&ids[0], "primers", json!("M13F/M13R"))
        .unwrap();
    canvas
        .set_field_value(&ids[2], "gel-percent", json!("1%"))
        .unwrap();
    canvas
}

#[allow(dead_code)]
pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
