//! Integration tests for benchflow
//!
//! End-to-end flows: load a catalog, build a canvas, decompose it, check it
//! and produce submission payloads.
mod common;
use benchflow::prelude::*;
use common::*;
use serde_json::json;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_checkout_flow() {
        let mut session = CanvasSession::new(lab_catalog(), test_config());

        // Two independent workflows and a stray node.
        let cloning = session.add_bundle("cloning").unwrap();
        let verify = session.add_bundle("verify").unwrap();
        session
            .add_service(&Anchor::Root, "sequencing", Position::new(900.0, 0.0))
            .unwrap();

        for id in [&cloning[0], &verify[0]] {
            let canvas = session.canvas_mut();
            canvas.set_field_value(id, "template", json!("pUC19")).unwrap();
            canvas.set_field_value(id, "primers", json!("M13F/M13R")).unwrap();
        }

        let workflows = session.workflows();
        assert_eq!(workflows.len(), 3);
        println!("{}", WorkflowFormatter::format_workflows(&workflows));

        let report = session.readiness();
        assert!(!report.is_ready());
        // Both gel nodes and both sequencing nodes still miss values.
        assert_eq!(report.unfilled_count(), 4);
        assert!(report.workflows.iter().all(|w| !w.is_ready()));

        let submissions = session.submissions("Order 17");
        let names: Vec<&str> = submissions.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Order 17 (1)", "Order 17 (2)", "Order 17 (3)"]);
        let sizes: Vec<usize> = submissions.iter().map(|s| s.nodes.len()).collect();
        assert_eq!(sizes, vec![3, 4, 1]);

        let json = serde_json::to_value(&submissions).unwrap();
        assert_eq!(json[0]["nodes"][0]["serviceId"], json!("pcr"));
        assert_eq!(json[1]["edges"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_canvas_json_from_the_ui() {
        let data: CanvasData = serde_json::from_value(json!({
            "nodes": [
                { "id": "n1", "serviceId": "pcr", "label": "PCR", "position": { "x": 0, "y": 0 } },
                { "id": "n2", "serviceId": "dpn1", "label": "DpnI Digest", "position": { "x": 0, "y": 150 } },
                { "id": "n3", "serviceId": "run-gel", "label": "Run Gel", "position": { "x": 0, "y": 300 } },
                { "id": "n4", "serviceId": "sequencing", "label": "Sanger Sequencing" }
            ],
            "edges": [
                { "id": "e1", "source": "n1", "target": "n2" },
                { "id": "e2", "source": "n2", "target": "n3" },
                { "id": "e3", "source": "n3", "target": "n9" }
            ]
        }))
        .unwrap();
        let canvas = Canvas::from_data(data, Default::default());
        let catalog = lab_catalog();

        // The dangling edge truncates quietly in lenient mode...
        let workflows = decompose(canvas.nodes(), canvas.edges());
        assert_eq!(
            chain_ids(&workflows),
            vec![vec!["n1", "n2", "n3"], vec!["n4"]]
        );
        // ...and is reported in strict mode.
        assert!(matches!(
            decompose_strict(canvas.nodes(), canvas.edges()),
            Err(GraphIntegrityError::DanglingEdge { .. })
        ));

        assert!(is_valid_connection(&catalog, canvas.nodes(), "n1", "n2"));
        assert!(!is_valid_connection(&catalog, canvas.nodes(), "n3", "n9"));
    }

    #[test]
    fn test_edit_resubmit_cycle() {
        let mut session = CanvasSession::new(lab_catalog(), test_config());
        session.add_bundle("cloning").unwrap();
        let first = session.submissions("Clone");

        // Re-open the submission on a fresh canvas, extend it and resubmit.
        let mut editing = CanvasSession::new(lab_catalog(), test_config());
        editing.reopen(first[0].clone()).unwrap();
        let last = editing.workflows()[0].last().unwrap().id.clone();
        editing
            .add_service(&Anchor::Node(last), "gel-extraction", Position::default())
            .unwrap();

        let second = editing.submissions("Clone v2");
        assert_eq!(second.len(), 1);
        let services: Vec<&str> = second[0]
            .nodes
            .iter()
            .map(|n| n.service_id.as_str())
            .collect();
        assert_eq!(services, vec!["pcr", "dpn1", "run-gel", "gel-extraction"]);
    }
}
