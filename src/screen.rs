pub mod dashboard;

#[derive(thiserror::Error, Debug, Clone)]
pub enum DashboardError {
    #[error("Fetch error: {0}")]
    Fetch(String),
}

impl From<exchange::AdapterError> for DashboardError {
    fn from(err: exchange::AdapterError) -> Self {
        DashboardError::Fetch(err.to_string())
    }
}
