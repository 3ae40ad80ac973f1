//! Controlador de sesión: navegación de corpus, filtrado, selección,
//! ciclo de vida de diccionarios y búsqueda.
//!
//! El controlador posee la `Sesion` y habla con el backend a través del
//! trait `BackendApi`. Cada operación valida sus precondiciones antes de
//! lanzar petición alguna, aplica la respuesta sólo si su ticket de
//! secuencia sigue vigente y devuelve la proyección que la capa de
//! presentación debe re-pintar.

use tracing::info;

use crate::backend::{BackendApi, BackendError};
use crate::models::{Corpus, DiccionarioInfo, Documento, Grafo, Metadato, ResultadoBusqueda};
use crate::session::Sesion;
use crate::view::{self, ResumenGrafo, VistaDocumentos};

/// Tope fijo de resultados pedidos al backend en cada búsqueda.
pub const TOP_K_BUSQUEDA: usize = 15;

pub const MSG_SIN_CORPUS: &str = "Selecciona un corpus.";
pub const MSG_SIN_DOCUMENTOS: &str = "Selecciona documentos.";
pub const MSG_SIN_DEFINICION: &str = "Introduce una definición.";
pub const MSG_SIN_DICCIONARIO: &str =
    "Selecciona y carga un diccionario de la lista de la izquierda primero.";

/// Errores de las operaciones de sesión, según su origen: precondición
/// del usuario sin cumplir (no se llegó a lanzar petición) o fallo
/// reportado por el backend.
#[derive(Debug, thiserror::Error)]
pub enum SesionError {
    #[error("{0}")]
    Validacion(&'static str),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Desenlace de `procesar`: el usuario canceló al no dar nombre, o el
/// diccionario quedó guardado. `Guardado` indica además a la interfaz
/// que debe pasar a la vista de búsqueda.
#[derive(Debug)]
pub enum Procesado {
    Cancelado,
    Guardado {
        mensaje: String,
        resumen: ResumenGrafo,
    },
}

pub struct Controlador<B: BackendApi> {
    backend: B,
    pub sesion: Sesion,
}

impl<B: BackendApi> Controlador<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            sesion: Sesion::default(),
        }
    }

    // --- Navegación de corpus ---

    /// Lista los corpus disponibles, en el orden del backend.
    pub async fn listar_corpora(&self) -> Result<Vec<Corpus>, SesionError> {
        Ok(self.backend.corpora().await?)
    }

    /// Activa un corpus: vacía selección y filtro, carga sus metadatos y
    /// su listado de documentos sin filtrar.
    pub async fn activar_corpus(&mut self, corpus: Corpus) -> Result<VistaDocumentos, SesionError> {
        info!(corpus = corpus.id, nombre = %corpus.nombre, "activando corpus");
        self.sesion.activar_corpus(corpus.clone());

        let ticket = self.sesion.secuencias.metadatos.emitir();
        let metadatos = self.backend.metadatos(corpus.id).await?;
        self.aplicar_metadatos(ticket, metadatos);

        match self.refrescar_documentos().await? {
            Some(vista) => Ok(vista),
            None => Ok(self.vista_documentos()),
        }
    }

    // --- Filtrado y listado de documentos ---

    /// Cambia el valor elegido de un metadato (vacío = comodín) y
    /// re-lista los documentos con el filtro resultante.
    pub async fn cambiar_filtro(
        &mut self,
        metadato: &str,
        valor: &str,
    ) -> Result<Option<VistaDocumentos>, SesionError> {
        if self.sesion.corpus_actual.is_none() {
            return Err(SesionError::Validacion(MSG_SIN_CORPUS));
        }
        self.sesion.filtro.fijar(metadato, valor);
        self.refrescar_documentos().await
    }

    /// Re-lista los documentos del corpus activo con el filtro vigente.
    /// Devuelve `None` si la respuesta llegó superada por una petición
    /// más reciente y fue descartada.
    pub async fn refrescar_documentos(
        &mut self,
    ) -> Result<Option<VistaDocumentos>, SesionError> {
        let corpus_id = match &self.sesion.corpus_actual {
            Some(c) => c.id,
            None => return Err(SesionError::Validacion(MSG_SIN_CORPUS)),
        };

        let ticket = self.sesion.secuencias.documentos.emitir();
        let documentos = self.backend.documentos(corpus_id, &self.sesion.filtro).await?;
        Ok(self.aplicar_listado(ticket, documentos))
    }

    /// Proyección actual de la lista de documentos, con los checkboxes
    /// reconstruidos desde la selección.
    pub fn vista_documentos(&self) -> VistaDocumentos {
        view::vista_documentos(
            &self.sesion.metadatos,
            &self.sesion.documentos,
            &self.sesion.filtro,
            &self.sesion.seleccion,
        )
    }

    // --- Selección ---

    pub fn alternar_documento(&mut self, id: i64) -> bool {
        self.sesion.seleccion.alternar(id)
    }

    pub fn seleccionar_visibles(&mut self) {
        let visibles = self.sesion.ids_visibles();
        self.sesion.seleccion.seleccionar_visibles(&visibles);
    }

    pub fn deseleccionar_visibles(&mut self) {
        let visibles = self.sesion.ids_visibles();
        self.sesion.seleccion.deseleccionar_visibles(&visibles);
    }

    // --- Ciclo de vida de diccionarios ---

    /// Procesa la selección actual en un diccionario con el nombre dado.
    /// Un nombre vacío (tras recortar) es una cancelación del usuario y
    /// no lanza petición. Con éxito el diccionario pasa a ser el activo;
    /// si el backend falla, el activo no cambia.
    pub async fn procesar(&mut self, nombre: &str) -> Result<Procesado, SesionError> {
        let corpus_id = match &self.sesion.corpus_actual {
            Some(c) => c.id,
            None => return Err(SesionError::Validacion(MSG_SIN_CORPUS)),
        };
        if self.sesion.seleccion.esta_vacia() {
            return Err(SesionError::Validacion(MSG_SIN_DOCUMENTOS));
        }
        let nombre = nombre.trim();
        if nombre.is_empty() {
            return Ok(Procesado::Cancelado);
        }

        let doc_ids = self.sesion.seleccion.ordenadas(&self.sesion.documentos);

        self.sesion.estado.ocupado = true;
        self.sesion.estado.mensaje = "Procesando corpus...".to_string();
        let resultado = self.backend.procesar(corpus_id, &doc_ids, nombre).await;
        self.sesion.estado.ocupado = false;

        match resultado {
            Ok((mensaje, grafo)) => {
                let resumen = view::resumen_grafo(&grafo);
                self.sesion.fijar_diccionario(nombre, grafo);
                self.sesion.estado.mensaje = mensaje.clone();
                info!(diccionario = nombre, "diccionario generado");
                Ok(Procesado::Guardado { mensaje, resumen })
            }
            Err(e) => {
                self.sesion.estado.mensaje = format!("Error: {e}");
                Err(e.into())
            }
        }
    }

    /// Catálogo de diccionarios guardados. Se consulta cada vez que la
    /// vista de búsqueda se hace visible, sin caché, para reflejar
    /// diccionarios creados o borrados desde fuera.
    pub async fn listar_diccionarios(&self) -> Result<Vec<DiccionarioInfo>, SesionError> {
        Ok(self.backend.diccionarios().await?)
    }

    /// Carga un diccionario guardado y lo convierte en el activo. Si la
    /// respuesta llegó superada se descarta y devuelve `None`, dejando el
    /// activo como estaba. Si el backend falla, el activo tampoco cambia.
    pub async fn cargar_diccionario(
        &mut self,
        nombre: &str,
    ) -> Result<Option<ResumenGrafo>, SesionError> {
        let ticket = self.sesion.secuencias.grafo.emitir();

        self.sesion.estado.ocupado = true;
        let resultado = self.backend.cargar_diccionario(nombre).await;
        self.sesion.estado.ocupado = false;

        let (mensaje, grafo) = resultado?;
        Ok(self.aplicar_grafo(ticket, nombre, mensaje, grafo))
    }

    /// Elimina un diccionario del catálogo. Sin confirmación del usuario
    /// no se lanza petición y se devuelve `None`. Con éxito, si el
    /// eliminado era el activo la sesión queda sin diccionario y sin
    /// grafo ni resultados; en todo caso se devuelve el catálogo ya
    /// refrescado.
    pub async fn eliminar_diccionario(
        &mut self,
        nombre: &str,
        confirmado: bool,
    ) -> Result<Option<Vec<DiccionarioInfo>>, SesionError> {
        if !confirmado {
            return Ok(None);
        }

        self.sesion.estado.ocupado = true;
        let resultado = self.backend.eliminar_diccionario(nombre).await;
        self.sesion.estado.ocupado = false;
        resultado?;

        self.sesion.descartar_diccionario(nombre);
        info!(diccionario = nombre, "diccionario eliminado");
        let lista = self.backend.diccionarios().await?;
        Ok(Some(lista))
    }

    // --- Búsqueda ---

    /// Busca términos por definición contra el diccionario activo. Sin
    /// definición o sin diccionario activo no se lanza petición. Los
    /// resultados llegan ya ordenados por puntuación; el cliente no los
    /// reordena.
    pub async fn buscar(
        &mut self,
        definicion: &str,
    ) -> Result<Vec<ResultadoBusqueda>, SesionError> {
        let definicion = definicion.trim();
        if definicion.is_empty() {
            return Err(SesionError::Validacion(MSG_SIN_DEFINICION));
        }
        let diccionario = match &self.sesion.diccionario_activo {
            Some(d) => d.clone(),
            None => return Err(SesionError::Validacion(MSG_SIN_DICCIONARIO)),
        };

        let resultados = self
            .backend
            .buscar(definicion, TOP_K_BUSQUEDA, &diccionario)
            .await?;
        self.sesion.resultados = resultados.clone();
        Ok(resultados)
    }

    // --- Aplicación de respuestas con ticket ---

    fn aplicar_metadatos(&mut self, ticket: u64, metadatos: Vec<Metadato>) {
        if self.sesion.secuencias.metadatos.vigente(ticket) {
            self.sesion.metadatos = metadatos;
        }
    }

    fn aplicar_listado(
        &mut self,
        ticket: u64,
        documentos: Vec<Documento>,
    ) -> Option<VistaDocumentos> {
        if !self.sesion.secuencias.documentos.vigente(ticket) {
            return None;
        }
        self.sesion.documentos = documentos;
        Some(self.vista_documentos())
    }

    fn aplicar_grafo(
        &mut self,
        ticket: u64,
        nombre: &str,
        mensaje: String,
        grafo: Grafo,
    ) -> Option<ResumenGrafo> {
        if !self.sesion.secuencias.grafo.vigente(ticket) {
            return None;
        }
        let resumen = view::resumen_grafo(&grafo);
        self.sesion.fijar_diccionario(nombre, grafo);
        self.sesion.estado.mensaje = mensaje;
        Some(resumen)
    }
}
