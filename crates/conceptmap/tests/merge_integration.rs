//! Integration tests for merging section documents and validating graphs.

use conceptmap::domain::{Edge, GraphData};
use conceptmap::merge::{GraphIssue, merge_sections, read_section_files, validate_graph};
use tempfile::TempDir;

mod common;
use common::{concept, section_graph, write_json};

fn edge(source: &str, target: &str, relation: &str) -> Edge {
    let mut edge = Edge::new(source, target, 0.8);
    edge.relation = Some(relation.to_string());
    edge
}

// ============================================================================
// Reading Section Files
// ============================================================================

#[tokio::test]
async fn test_read_section_files_orders_by_file_name() {
    let temp = TempDir::new().unwrap();
    write_json(temp.path(), "graph_sec3-0.json", &section_graph(&["c"]));
    write_json(temp.path(), "graph_sec1-0.json", &section_graph(&["a"]));
    write_json(temp.path(), "graph_merged.json", &section_graph(&["x"]));
    write_json(temp.path(), "cross_chapter_links.json", &section_graph(&[]));

    let sections = read_section_files(temp.path()).await.unwrap();

    let ids: Vec<_> = sections.iter().map(|s| s.section_id.as_str()).collect();
    assert_eq!(ids, vec!["1-0", "3-0"]);
    assert_eq!(sections[0].file, "graph_sec1-0.json");
}

#[tokio::test]
async fn test_read_section_files_rejects_malformed_file() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("graph_sec2-0.json"), "[").unwrap();

    let err = read_section_files(temp.path()).await.unwrap_err();
    assert!(err.to_string().contains("graph_sec2-0.json"));
}

// ============================================================================
// Merge Tests
// ============================================================================

#[tokio::test]
async fn test_merge_from_disk_renames_shared_ids() {
    let temp = TempDir::new().unwrap();
    write_json(
        temp.path(),
        "graph_sec1-0.json",
        &GraphData::new(vec![concept("plurality"), concept("seeing")], vec![edge("seeing", "plurality", "part_of")]),
    );
    write_json(
        temp.path(),
        "graph_sec2-0.json",
        &GraphData::new(vec![concept("plurality"), concept("gap")], vec![edge("gap", "plurality", "contrasts")]),
    );

    let sections = read_section_files(temp.path()).await.unwrap();
    let merged = merge_sections(&sections);

    let ids: Vec<_> = merged.graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["plurality_sec1-0", "seeing", "plurality_sec2-0", "gap"]);
    assert_eq!(merged.graph.edges[0].target, "plurality_sec1-0");
    assert_eq!(merged.graph.edges[1].target, "plurality_sec2-0");
    assert_eq!(merged.metadata.statistics.id_collisions_resolved, 1);
    assert_eq!(merged.metadata.total_sections, 2);
    assert!(validate_graph(&merged.graph).is_empty());
}

#[tokio::test]
async fn test_merged_document_loads_back_as_graph() {
    let temp = TempDir::new().unwrap();
    write_json(temp.path(), "graph_sec1-0.json", &section_graph(&["a", "b"]));

    let merged = merge_sections(&read_section_files(temp.path()).await.unwrap());
    let json = serde_json::to_string(&merged).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["metadata"]["merged_from"][0]["section_id"], "1-0");
    assert_eq!(value["metadata"]["statistics"]["total_nodes"], 2);

    let graph: GraphData = serde_json::from_str(&json).unwrap();
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.nodes[0].source_section.as_deref(), Some("1-0"));
}

// ============================================================================
// Validation Tests
// ============================================================================

#[test]
fn test_validate_reports_duplicates_then_dangling_edges() {
    let graph = GraphData::new(
        vec![concept("a"), concept("a"), concept("b")],
        vec![edge("a", "b", "x"), edge("ghost", "b", "x"), edge("a", "void", "x")],
    );

    let issues = validate_graph(&graph);

    assert_eq!(
        issues,
        vec![
            GraphIssue::DuplicateNodeId { id: "a".to_string() },
            GraphIssue::DanglingSource { edge: 1, id: "ghost".to_string() },
            GraphIssue::DanglingTarget { edge: 2, id: "void".to_string() },
        ]
    );
}
