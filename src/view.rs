//! Proyecciones de sólo lectura para la capa de presentación.
//!
//! Ninguna función de este módulo muta estado: reciben la sesión (o
//! piezas de ella) y devuelven estructuras listas para pintar. El estado
//! de los checkboxes se recalcula siempre desde la selección, nunca se
//! confía en lo que hubiera pintado un renderizado anterior.

use crate::filters::FiltroMetadatos;
use crate::models::{Documento, Grafo, Metadato, NodoGrafo, ResultadoBusqueda};
use crate::selection::Seleccion;

/// Tope fijo de nodos mostrados en la vista previa del grafo.
pub const MAX_NODOS_MUESTRA: usize = 100;

/// Un control de filtro: el metadato, sus valores posibles y el valor
/// actualmente elegido (ninguno = comodín). Un metadato sin valores se
/// proyecta igualmente, con sólo el comodín disponible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlMetadato {
    pub nombre: String,
    pub valores: Vec<String>,
    pub elegido: Option<String>,
}

/// Una fila de la lista de documentos con su estado de checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilaDocumento {
    pub id: i64,
    pub archivo: String,
    pub seleccionado: bool,
}

/// La lista de documentos tal y como debe pintarse: panel de filtros con
/// las elecciones conservadas, filas con los checkboxes reconstruidos y
/// el recuento global de seleccionados (visibles o no).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VistaDocumentos {
    pub controles: Vec<ControlMetadato>,
    pub filas: Vec<FilaDocumento>,
    pub total_seleccionados: usize,
}

impl VistaDocumentos {
    /// Un listado filtrado sin resultados es un estado vacío explícito,
    /// no un error.
    pub fn sin_documentos(&self) -> bool {
        self.filas.is_empty()
    }
}

pub fn vista_documentos(
    metadatos: &[Metadato],
    documentos: &[Documento],
    filtro: &FiltroMetadatos,
    seleccion: &Seleccion,
) -> VistaDocumentos {
    let controles = metadatos
        .iter()
        .map(|m| ControlMetadato {
            nombre: m.nombre.clone(),
            valores: m.valores.clone(),
            elegido: filtro.valor_de(&m.nombre).map(str::to_string),
        })
        .collect();

    let filas = documentos
        .iter()
        .map(|d| FilaDocumento {
            id: d.id,
            archivo: d.archivo.clone(),
            seleccionado: seleccion.contiene(d.id),
        })
        .collect();

    VistaDocumentos {
        controles,
        filas,
        total_seleccionados: seleccion.total(),
    }
}

/// Resumen de un grafo devuelto por el backend: recuentos totales y una
/// muestra con los primeros nodos en el orden en que llegaron.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumenGrafo {
    pub total_nodos: usize,
    pub total_aristas: usize,
    pub muestra: Vec<NodoGrafo>,
}

pub fn resumen_grafo(grafo: &Grafo) -> ResumenGrafo {
    ResumenGrafo {
        total_nodos: grafo.nodes.len(),
        total_aristas: grafo.edges.len(),
        muestra: grafo
            .nodes
            .iter()
            .take(MAX_NODOS_MUESTRA)
            .cloned()
            .collect(),
    }
}

/// Línea de un nodo en la vista previa: `término (f:12, d:4)`.
pub fn linea_nodo(nodo: &NodoGrafo) -> String {
    format!("{} (f:{}, d:{})", nodo.id, nodo.frequency, nodo.degree)
}

/// Línea de un resultado de búsqueda, con la puntuación a 4 decimales.
pub fn linea_resultado(resultado: &ResultadoBusqueda) -> String {
    format!("{} (Score: {:.4})", resultado.palabra, resultado.score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodo(id: &str) -> NodoGrafo {
        NodoGrafo {
            id: id.to_string(),
            frequency: 1,
            degree: 1,
        }
    }

    #[test]
    fn la_vista_reconstruye_los_checkboxes_desde_la_seleccion() {
        let documentos = vec![
            Documento { id: 1, archivo: "a.txt".into() },
            Documento { id: 2, archivo: "b.txt".into() },
        ];
        let mut seleccion = Seleccion::default();
        seleccion.alternar(2);
        // Un documento fuera de la vista sigue contando en el total.
        seleccion.alternar(9);

        let vista = vista_documentos(&[], &documentos, &FiltroMetadatos::default(), &seleccion);

        assert!(!vista.filas[0].seleccionado);
        assert!(vista.filas[1].seleccionado);
        assert_eq!(vista.total_seleccionados, 2);
    }

    #[test]
    fn los_controles_conservan_el_valor_elegido() {
        let metadatos = vec![
            Metadato {
                nombre: "Área".into(),
                valores: vec!["Medicina".into(), "Historia".into()],
            },
            Metadato { nombre: "Fuente".into(), valores: vec![] },
        ];
        let mut filtro = FiltroMetadatos::default();
        filtro.fijar("Área", "Medicina");

        let vista = vista_documentos(&metadatos, &[], &filtro, &Seleccion::default());

        assert_eq!(vista.controles[0].elegido.as_deref(), Some("Medicina"));
        // Un metadato sin valores se proyecta igualmente, sólo con el comodín.
        assert_eq!(vista.controles[1].nombre, "Fuente");
        assert!(vista.controles[1].valores.is_empty());
        assert!(vista.controles[1].elegido.is_none());
        assert!(vista.sin_documentos());
    }

    #[test]
    fn el_resumen_corta_la_muestra_en_cien_nodos() {
        let grafo = Grafo {
            nodes: (0..150).map(|i| nodo(&format!("n{i}"))).collect(),
            edges: vec![],
        };

        let resumen = resumen_grafo(&grafo);

        assert_eq!(resumen.total_nodos, 150);
        assert_eq!(resumen.muestra.len(), MAX_NODOS_MUESTRA);
        // Orden del backend, sin reordenar en el cliente.
        assert_eq!(resumen.muestra[0].id, "n0");
        assert_eq!(resumen.muestra[99].id, "n99");
    }

    #[test]
    fn el_resumen_de_un_grafo_pequeno_muestra_todos_los_nodos() {
        let grafo = Grafo {
            nodes: (0..50).map(|i| nodo(&format!("n{i}"))).collect(),
            edges: (0..30)
                .map(|i| crate::models::AristaGrafo {
                    source: format!("n{i}"),
                    target: format!("n{}", i + 1),
                    weight: 1.0,
                })
                .collect(),
        };

        let resumen = resumen_grafo(&grafo);

        assert_eq!(resumen.total_nodos, 50);
        assert_eq!(resumen.total_aristas, 30);
        assert_eq!(resumen.muestra.len(), 50);
    }

    #[test]
    fn la_puntuacion_se_formatea_a_cuatro_decimales() {
        let linea = linea_resultado(&ResultadoBusqueda {
            palabra: "célula".into(),
            score: 0.87654321,
        });
        assert_eq!(linea, "célula (Score: 0.8765)");
    }
}
