//! Gestor de selección de documentos.
//!
//! La pertenencia a la selección es independiente del filtro que produjo
//! la lista visible: un documento marcado bajo un filtro sigue marcado si
//! otro filtro lo saca de la vista, y debe reaparecer marcado cuando un
//! filtro posterior lo devuelva a ella.

use std::collections::HashSet;

use crate::models::Documento;

/// Conjunto de identificadores de documentos seleccionados por el usuario.
#[derive(Debug, Default, Clone)]
pub struct Seleccion {
    ids: HashSet<i64>,
}

impl Seleccion {
    /// Invierte el estado de selección de un documento. Devuelve `true`
    /// si el documento queda seleccionado.
    pub fn alternar(&mut self, id: i64) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Marca todos los documentos visibles. No toca nada fuera de la
    /// lista recibida.
    pub fn seleccionar_visibles(&mut self, visibles: &[i64]) {
        self.ids.extend(visibles.iter().copied());
    }

    /// Desmarca únicamente los documentos visibles; las selecciones de
    /// documentos fuera de la lista actual se conservan.
    pub fn deseleccionar_visibles(&mut self, visibles: &[i64]) {
        for id in visibles {
            self.ids.remove(id);
        }
    }

    pub fn contiene(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn total(&self) -> usize {
        self.ids.len()
    }

    pub fn esta_vacia(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn limpiar(&mut self) {
        self.ids.clear();
    }

    /// Ids de la selección en orden determinista: primero en el orden del
    /// último listado de documentos, después el resto (documentos que el
    /// filtro actual dejó fuera de la vista) en orden ascendente.
    pub fn ordenadas(&self, ultimo_listado: &[Documento]) -> Vec<i64> {
        let mut resultado = Vec::with_capacity(self.ids.len());
        let mut vistos: HashSet<i64> = HashSet::with_capacity(self.ids.len());

        for doc in ultimo_listado {
            if self.ids.contains(&doc.id) && vistos.insert(doc.id) {
                resultado.push(doc.id);
            }
        }

        let mut restantes: Vec<i64> = self
            .ids
            .iter()
            .copied()
            .filter(|id| !vistos.contains(id))
            .collect();
        restantes.sort_unstable();
        resultado.extend(restantes);

        resultado
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: i64) -> Documento {
        Documento {
            id,
            archivo: format!("doc_{id}.txt"),
        }
    }

    #[test]
    fn alternar_marca_y_desmarca() {
        let mut sel = Seleccion::default();
        assert!(sel.alternar(7));
        assert!(sel.contiene(7));
        assert!(!sel.alternar(7));
        assert!(!sel.contiene(7));
    }

    #[test]
    fn deseleccionar_visibles_no_toca_lo_oculto() {
        let mut sel = Seleccion::default();
        sel.seleccionar_visibles(&[1, 2, 3]);

        // Cambia el filtro: ahora sólo 2 y 3 están a la vista.
        sel.deseleccionar_visibles(&[2, 3]);

        assert!(sel.contiene(1));
        assert!(!sel.contiene(2));
        assert!(!sel.contiene(3));
        assert_eq!(sel.total(), 1);
    }

    #[test]
    fn seleccionar_visibles_acumula_entre_filtros() {
        let mut sel = Seleccion::default();
        sel.seleccionar_visibles(&[1, 2]);
        sel.seleccionar_visibles(&[3]);
        assert_eq!(sel.total(), 3);
        assert!(sel.contiene(1));
        assert!(sel.contiene(3));
    }

    #[test]
    fn ordenadas_respeta_el_orden_del_listado() {
        let mut sel = Seleccion::default();
        sel.seleccionar_visibles(&[9, 2, 5, 40]);

        // El último listado sólo muestra 5 y 9, en ese orden.
        let listado = vec![doc(5), doc(9)];
        assert_eq!(sel.ordenadas(&listado), vec![5, 9, 2, 40]);
    }
}
