use crate::catalog::Catalog;
use crate::decomposer::decompose;
use crate::graph::CanvasData;
use crate::serializer::workflow_submissions;
use crate::validator::is_valid_connection;
use pyo3::prelude::*;

fn value_error(e: impl ToString) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string())
}

/// The workflow graph engine, bound to one service catalog.
///
/// Canvases are passed in and out as JSON strings of the form
/// `{"nodes": [...], "edges": [...]}`.
#[pyclass(name = "Benchflow")]
struct BenchflowPy {
    catalog: Catalog,
}

#[pymethods]
impl BenchflowPy {
    /// Loads the service catalog.
    ///
    /// Args:
    ///     catalog_json (str): The catalog query result, with `services` and
    ///         optionally `bundles`.
    ///
    /// Raises:
    ///     ValueError: If the catalog JSON is malformed.
    #[new]
    fn new(catalog_json: &str) -> PyResult<Self> {
        let catalog = Catalog::from_json(catalog_json).map_err(value_error)?;
        Ok(BenchflowPy { catalog })
    }

    /// Splits a canvas into workflows.
    ///
    /// Returns:
    ///     list[list[str]]: The node ids of each workflow, upstream first.
    fn decompose(&self, canvas_json: &str) -> PyResult<Vec<Vec<String>>> {
        let data: CanvasData = serde_json::from_str(canvas_json).map_err(value_error)?;
        Ok(decompose(&data.nodes, &data.edges)
            .into_iter()
            .map(|chain| chain.into_iter().map(|node| node.id.clone()).collect())
            .collect())
    }

    /// Builds one submission payload per workflow.
    ///
    /// Returns:
    ///     str: A JSON array of `{name, nodes, edges}` objects.
    fn workflow_submissions(&self, canvas_json: &str, name: &str) -> PyResult<String> {
        let data: CanvasData = serde_json::from_str(canvas_json).map_err(value_error)?;
        let submissions = workflow_submissions(&data.nodes, &data.edges, name);
        serde_json::to_string(&submissions).map_err(value_error)
    }

    /// Whether the catalog allows `source` to feed into `target`.
    fn is_valid_connection(&self, canvas_json: &str, source: &str, target: &str) -> PyResult<bool> {
        let data: CanvasData = serde_json::from_str(canvas_json).map_err(value_error)?;
        Ok(is_valid_connection(&self.catalog, &data.nodes, source, target))
    }
}

/// Workflow graph engine for lab service canvases.
#[pymodule]
fn benchflow(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<BenchflowPy>()?;
    Ok(())
}
