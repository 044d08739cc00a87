use petal_graph::GraphError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("No routable node near the start coordinates")]
    StartNotFound,
    #[error("No routable node near the end coordinates")]
    EndNotFound,
    #[error("No route could be generated: every candidate was discarded")]
    NoCandidates,
    #[error("Failed to build the worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error(transparent)]
    Graph(#[from] GraphError),
}
