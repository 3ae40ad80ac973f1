//! Modelos de dominio (corpus, documentos, metadatos y grafo léxico).
//!
//! Los nombres de campo coinciden con el JSON que devuelve el backend
//! (`nombre`, `archivo`, `valores`, `palabra`, ...): no hay capa de
//! renombrado intermedia.

use serde::Deserialize;

/// Un corpus disponible en el servicio. Inmutable una vez listado;
/// activarlo es la raíz de una nueva sesión de navegación.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Corpus {
    pub id: i64,
    pub nombre: String,
}

/// Un documento dentro de un corpus.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Documento {
    pub id: i64,
    pub archivo: String,
}

/// Una dimensión de metadatos filtrable del corpus activo, con sus
/// valores posibles. El conjunto de metadatos se obtiene una vez por
/// activación de corpus.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Metadato {
    pub nombre: String,
    #[serde(default)]
    pub valores: Vec<String>,
}

/// Entrada del catálogo de diccionarios guardados en el servidor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiccionarioInfo {
    pub nombre: String,
}

/// Nodo del grafo de co-ocurrencia: un término con su frecuencia y grado.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodoGrafo {
    pub id: String,
    #[serde(default)]
    pub frequency: i64,
    #[serde(default)]
    pub degree: i64,
}

/// Arista del grafo. El peso se decodifica pero el cliente no lo resume
/// más allá del recuento de aristas.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AristaGrafo {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub weight: f64,
}

/// Grafo devuelto por el backend al procesar o cargar un diccionario.
/// Opaco para el cliente salvo los recuentos y la muestra de nodos.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Grafo {
    #[serde(default)]
    pub nodes: Vec<NodoGrafo>,
    #[serde(default)]
    pub edges: Vec<AristaGrafo>,
}

/// Un resultado de búsqueda por definición, ya ordenado por el backend
/// de mayor a menor puntuación.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultadoBusqueda {
    pub palabra: String,
    pub score: f64,
}
