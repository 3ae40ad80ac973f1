//! Estado de la sesión de navegación.
//!
//! Toda la mutabilidad de la interfaz (corpus actual, selección, filtro,
//! diccionario activo) vive en una única estructura `Sesion` poseída por
//! el controlador, en lugar de en variables globales sueltas: cada
//! operación muta esta instancia y la capa de presentación se re-proyecta
//! a partir de ella.

use crate::filters::FiltroMetadatos;
use crate::models::{Corpus, Documento, Grafo, Metadato, ResultadoBusqueda};
use crate::selection::Seleccion;

/// Indicador de actividad para la capa de presentación, al estilo de un
/// `statusBox`: las operaciones mutantes (procesar, cargar, eliminar)
/// marcan `ocupado` mientras su petición está en vuelo para que la vista
/// deshabilite el control que las disparó.
#[derive(Debug, Clone, Default)]
pub struct Estado {
    pub ocupado: bool,
    pub mensaje: String,
}

/// Contador monótono de peticiones para una operación lógica.
///
/// Antes de lanzar la petición se emite un ticket; al volver la
/// respuesta sólo se aplica si el ticket sigue siendo el último emitido.
/// Así una respuesta antigua nunca pisa el resultado de una petición más
/// reciente (dos cambios de filtro rápidos, por ejemplo).
#[derive(Debug, Clone, Copy, Default)]
pub struct Contador(u64);

impl Contador {
    pub fn emitir(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn vigente(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

/// Un contador por operación lógica con respuestas descartables.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secuencias {
    pub metadatos: Contador,
    pub documentos: Contador,
    pub grafo: Contador,
}

/// Estado completo de la sesión del navegador.
#[derive(Debug, Default)]
pub struct Sesion {
    /// Corpus activo; como mucho uno a la vez.
    pub corpus_actual: Option<Corpus>,
    /// Selección de documentos, independiente del filtro visible.
    pub seleccion: Seleccion,
    /// Filtro de metadatos vigente dentro de la sesión de corpus.
    pub filtro: FiltroMetadatos,
    /// Metadatos del corpus activo, cacheados en la activación.
    pub metadatos: Vec<Metadato>,
    /// Último listado de documentos recibido (define el orden visible).
    pub documentos: Vec<Documento>,
    /// Diccionario activo: `None` o el nombre fijado por la última
    /// operación de procesado o carga que terminó bien.
    pub diccionario_activo: Option<String>,
    /// Grafo del diccionario activo, si se ha renderizado alguno.
    pub grafo: Option<Grafo>,
    /// Últimos resultados de búsqueda renderizados.
    pub resultados: Vec<ResultadoBusqueda>,
    pub estado: Estado,
    pub secuencias: Secuencias,
}

impl Sesion {
    /// Activa un corpus: fija la sesión sobre él y vacía incondicionalmente
    /// la selección y el filtro de la sesión anterior.
    pub fn activar_corpus(&mut self, corpus: Corpus) {
        self.corpus_actual = Some(corpus);
        self.seleccion.limpiar();
        self.filtro.limpiar();
        self.metadatos.clear();
        self.documentos.clear();
    }

    /// Ids de los documentos actualmente visibles, en orden de listado.
    pub fn ids_visibles(&self) -> Vec<i64> {
        self.documentos.iter().map(|d| d.id).collect()
    }

    /// Transición `procesar`/`cargar` con éxito: el diccionario indicado
    /// pasa a ser el activo y su grafo el renderizado.
    pub fn fijar_diccionario(&mut self, nombre: &str, grafo: Grafo) {
        self.diccionario_activo = Some(nombre.to_string());
        self.grafo = Some(grafo);
    }

    /// Transición `eliminar` con éxito: si el eliminado era el activo, la
    /// sesión vuelve a no tener diccionario y se limpia todo lo derivado
    /// de él (grafo y resultados de búsqueda). Para cualquier otro nombre
    /// no cambia nada.
    pub fn descartar_diccionario(&mut self, nombre: &str) {
        if self.diccionario_activo.as_deref() == Some(nombre) {
            self.diccionario_activo = None;
            self.grafo = None;
            self.resultados.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(id: i64) -> Corpus {
        Corpus {
            id,
            nombre: format!("C{id}"),
        }
    }

    #[test]
    fn activar_corpus_vacia_seleccion_y_filtro() {
        let mut sesion = Sesion::default();
        sesion.seleccion.seleccionar_visibles(&[1, 2, 3]);
        sesion.filtro.fijar("Área", "Medicina");

        sesion.activar_corpus(corpus(2));

        assert_eq!(sesion.corpus_actual.as_ref().map(|c| c.id), Some(2));
        assert_eq!(sesion.seleccion.total(), 0);
        assert!(sesion.filtro.esta_vacio());
    }

    #[test]
    fn un_ticket_antiguo_deja_de_estar_vigente() {
        let mut seq = Secuencias::default();
        let primero = seq.documentos.emitir();
        let segundo = seq.documentos.emitir();

        assert!(!seq.documentos.vigente(primero));
        assert!(seq.documentos.vigente(segundo));
    }

    #[test]
    fn los_contadores_son_independientes_por_operacion() {
        let mut seq = Secuencias::default();
        let doc = seq.documentos.emitir();
        seq.grafo.emitir();
        seq.grafo.emitir();

        assert!(seq.documentos.vigente(doc));
    }

    #[test]
    fn descartar_el_diccionario_activo_limpia_lo_derivado() {
        let mut sesion = Sesion::default();
        sesion.fijar_diccionario("Médico", Grafo::default());
        sesion.resultados.push(crate::models::ResultadoBusqueda {
            palabra: "célula".to_string(),
            score: 0.9,
        });

        sesion.descartar_diccionario("Médico");

        assert!(sesion.diccionario_activo.is_none());
        assert!(sesion.grafo.is_none());
        assert!(sesion.resultados.is_empty());
    }

    #[test]
    fn descartar_otro_diccionario_no_cambia_nada() {
        let mut sesion = Sesion::default();
        sesion.fijar_diccionario("Médico", Grafo::default());

        sesion.descartar_diccionario("Histórico");

        assert_eq!(sesion.diccionario_activo.as_deref(), Some("Médico"));
        assert!(sesion.grafo.is_some());
    }
}
