//! Cliente HTTP del backend de corpus y diccionarios.
//!
//! API pública:
//!   - trait `BackendApi`: la costura que el controlador usa para hablar
//!     con el servicio (y que los tests sustituyen por un doble).
//!   - `HttpBackend`: implementación real sobre `reqwest`.
//!
//! Todas las respuestas del backend llegan en un sobre `{ok, ..., error}`.
//! El backend puede responder con estado HTTP 500 y aun así incluir el
//! sobre JSON, así que el sobre se decodifica sin mirar el estado HTTP y
//! sólo se informa de un fallo de conexión cuando el cuerpo no es el sobre.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::filters::FiltroMetadatos;
use crate::models::{Corpus, DiccionarioInfo, Documento, Grafo, Metadato, ResultadoBusqueda};

/// Errores del backend, separando lo que el servidor reportó en el sobre
/// (`ok: false`) de los fallos de transporte o decodificación.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("error del servidor: {0}")]
    Servidor(String),
    #[error("error de conexión: {0}")]
    Conexion(#[from] reqwest::Error),
}

/// Operaciones del backend que consume el controlador de sesión.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// `GET /api/corpora`
    async fn corpora(&self) -> Result<Vec<Corpus>, BackendError>;

    /// `GET /api/metadatos/{corpus_id}`
    async fn metadatos(&self, corpus_id: i64) -> Result<Vec<Metadato>, BackendError>;

    /// `GET /api/documentos/{corpus_id}`, con `?meta=...&valor=...` si el
    /// filtro no está vacío.
    async fn documentos(
        &self,
        corpus_id: i64,
        filtro: &FiltroMetadatos,
    ) -> Result<Vec<Documento>, BackendError>;

    /// `POST /api/process`. Devuelve el mensaje de confirmación y el grafo.
    async fn procesar(
        &self,
        corpus_id: i64,
        doc_ids: &[i64],
        dic_name: &str,
    ) -> Result<(String, Grafo), BackendError>;

    /// `GET /api/diccionarios`
    async fn diccionarios(&self) -> Result<Vec<DiccionarioInfo>, BackendError>;

    /// `POST /api/load_diccionario`
    async fn cargar_diccionario(&self, nombre: &str) -> Result<(String, Grafo), BackendError>;

    /// `POST /api/delete_diccionario`
    async fn eliminar_diccionario(&self, nombre: &str) -> Result<(), BackendError>;

    /// `POST /api/search`
    async fn buscar(
        &self,
        definition: &str,
        top_k: usize,
        diccionario: &str,
    ) -> Result<Vec<ResultadoBusqueda>, BackendError>;
}

// --- Sobres de respuesta de la API ---

#[derive(Deserialize)]
struct SobreLista<T> {
    ok: bool,
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct SobreGrafo {
    ok: bool,
    message: Option<String>,
    graph: Option<Grafo>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct SobreBusqueda {
    ok: bool,
    #[serde(default)]
    results: Vec<ResultadoBusqueda>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct SobreSimple {
    ok: bool,
    error: Option<String>,
}

fn error_servidor(error: Option<String>) -> BackendError {
    BackendError::Servidor(error.unwrap_or_else(|| "respuesta sin detalle de error".to_string()))
}

/// Implementación de `BackendApi` sobre HTTP.
pub struct HttpBackend {
    base: String,
    http: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, ruta: &str) -> String {
        format!("{}{}", self.base, ruta)
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn corpora(&self) -> Result<Vec<Corpus>, BackendError> {
        let res: SobreLista<Corpus> = self
            .http
            .get(self.url("/api/corpora"))
            .send()
            .await?
            .json()
            .await?;
        if !res.ok {
            return Err(error_servidor(res.error));
        }
        Ok(res.data)
    }

    async fn metadatos(&self, corpus_id: i64) -> Result<Vec<Metadato>, BackendError> {
        let res: SobreLista<Metadato> = self
            .http
            .get(self.url(&format!("/api/metadatos/{corpus_id}")))
            .send()
            .await?
            .json()
            .await?;
        if !res.ok {
            return Err(error_servidor(res.error));
        }
        Ok(res.data)
    }

    async fn documentos(
        &self,
        corpus_id: i64,
        filtro: &FiltroMetadatos,
    ) -> Result<Vec<Documento>, BackendError> {
        let mut peticion = self
            .http
            .get(self.url(&format!("/api/documentos/{corpus_id}")));

        // El backend empareja posicionalmente las dos listas separadas
        // por comas.
        if let Some((metas, valores)) = filtro.parametros() {
            debug!(%metas, %valores, "listando documentos filtrados");
            peticion = peticion.query(&[("meta", metas), ("valor", valores)]);
        }

        let res: SobreLista<Documento> = peticion.send().await?.json().await?;
        if !res.ok {
            return Err(error_servidor(res.error));
        }
        Ok(res.data)
    }

    async fn procesar(
        &self,
        corpus_id: i64,
        doc_ids: &[i64],
        dic_name: &str,
    ) -> Result<(String, Grafo), BackendError> {
        let res: SobreGrafo = self
            .http
            .post(self.url("/api/process"))
            .json(&json!({
                "corpus_id": corpus_id,
                "doc_ids": doc_ids,
                "dic_name": dic_name,
            }))
            .send()
            .await?
            .json()
            .await?;
        if !res.ok {
            return Err(error_servidor(res.error));
        }
        Ok((
            res.message.unwrap_or_default(),
            res.graph.unwrap_or_default(),
        ))
    }

    async fn diccionarios(&self) -> Result<Vec<DiccionarioInfo>, BackendError> {
        let res: SobreLista<DiccionarioInfo> = self
            .http
            .get(self.url("/api/diccionarios"))
            .send()
            .await?
            .json()
            .await?;
        if !res.ok {
            return Err(error_servidor(res.error));
        }
        Ok(res.data)
    }

    async fn cargar_diccionario(&self, nombre: &str) -> Result<(String, Grafo), BackendError> {
        let res: SobreGrafo = self
            .http
            .post(self.url("/api/load_diccionario"))
            .json(&json!({ "nombre": nombre }))
            .send()
            .await?
            .json()
            .await?;
        if !res.ok {
            return Err(error_servidor(res.error));
        }
        Ok((
            res.message.unwrap_or_default(),
            res.graph.unwrap_or_default(),
        ))
    }

    async fn eliminar_diccionario(&self, nombre: &str) -> Result<(), BackendError> {
        let res: SobreSimple = self
            .http
            .post(self.url("/api/delete_diccionario"))
            .json(&json!({ "nombre": nombre }))
            .send()
            .await?
            .json()
            .await?;
        if !res.ok {
            return Err(error_servidor(res.error));
        }
        Ok(())
    }

    async fn buscar(
        &self,
        definition: &str,
        top_k: usize,
        diccionario: &str,
    ) -> Result<Vec<ResultadoBusqueda>, BackendError> {
        let res: SobreBusqueda = self
            .http
            .post(self.url("/api/search"))
            .json(&json!({
                "definition": definition,
                "top_k": top_k,
                "diccionario": diccionario,
            }))
            .send()
            .await?
            .json()
            .await?;
        if !res.ok {
            return Err(error_servidor(res.error));
        }
        Ok(res.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn el_sobre_de_error_se_decodifica_sin_data() {
        let crudo = r#"{"ok": false, "error": "corpus no encontrado"}"#;
        let sobre: SobreLista<Corpus> = serde_json::from_str(crudo).unwrap();
        assert!(!sobre.ok);
        assert!(sobre.data.is_empty());
        assert_eq!(sobre.error.as_deref(), Some("corpus no encontrado"));
    }

    #[test]
    fn el_sobre_de_grafo_acepta_respuesta_completa() {
        let crudo = r#"{
            "ok": true,
            "message": "Diccionario 'Médico' generado exitosamente.",
            "graph": {
                "nodes": [{"id": "célula", "frequency": 12, "degree": 4}],
                "edges": [{"source": "célula", "target": "tejido", "weight": 2.5}]
            }
        }"#;
        let sobre: SobreGrafo = serde_json::from_str(crudo).unwrap();
        assert!(sobre.ok);
        let grafo = sobre.graph.unwrap();
        assert_eq!(grafo.nodes.len(), 1);
        assert_eq!(grafo.edges[0].weight, 2.5);
    }

    #[test]
    fn la_url_base_no_duplica_barras() {
        let backend = HttpBackend::new("http://localhost:5000/");
        assert_eq!(backend.url("/api/corpora"), "http://localhost:5000/api/corpora");
    }
}
