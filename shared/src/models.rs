use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Produto {
    pub id: i64,
    pub nome: String,
    pub preco: f64,
    pub estoque: i64,
    pub codigo_barras: String,
    pub categoria: String,
    #[serde(default = "default_ativo")]
    pub ativo: bool,
}

fn default_ativo() -> bool {
    true
}

/// Envelope returned by the backend's JSON endpoints, e.g.
/// `{"success": true, "produto": {...}}` or `{"success": false, "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiReply<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    // Missing `Option` fields read as `None`; a `default` here would demand `T: Default`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub produto: Option<T>,
}

impl<T> ApiReply<T> {
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.produto) {
            (true, Some(value)) => Ok(value),
            (_, _) => Err(self
                .message
                .unwrap_or_else(|| "Resposta sem dados".to_string())),
        }
    }
}
