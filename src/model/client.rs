use serde::{Deserialize, Serialize};

/// A client the provider does work for. Clients own projects but play
/// no part in completion propagation; the board can regroup by them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub provider_id: String,
}
