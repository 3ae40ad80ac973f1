//! Selección de filtros por metadatos.
//!
//! Un `FiltroMetadatos` asocia a cada metadato del corpus activo el valor
//! elegido por el usuario; ausencia de entrada equivale al comodín
//! "--Cualquiera--". Persiste entre re-renderizados de la lista de
//! documentos dentro de la misma sesión de corpus y se vacía al cambiar
//! de corpus.

use std::collections::BTreeMap;

/// Mapa de nombre de metadato a valor elegido.
///
/// El orden de iteración (alfabético por nombre) es el que se usa para
/// emparejar posicionalmente las listas `meta` y `valor` de la petición:
/// lo único que exige el backend es que ambas listas sean coherentes
/// entre sí.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FiltroMetadatos {
    seleccion: BTreeMap<String, String>,
}

impl FiltroMetadatos {
    /// Fija el valor elegido para un metadato. El valor vacío es el
    /// comodín y elimina la entrada.
    pub fn fijar(&mut self, metadato: &str, valor: &str) {
        if valor.is_empty() {
            self.seleccion.remove(metadato);
        } else {
            self.seleccion
                .insert(metadato.to_string(), valor.to_string());
        }
    }

    /// Valor actualmente elegido para un metadato, si lo hay. Se usa al
    /// re-renderizar el panel para no perder la elección de los demás
    /// controles.
    pub fn valor_de(&self, metadato: &str) -> Option<&str> {
        self.seleccion.get(metadato).map(String::as_str)
    }

    pub fn esta_vacio(&self) -> bool {
        self.seleccion.is_empty()
    }

    pub fn limpiar(&mut self) {
        self.seleccion.clear();
    }

    /// Parámetros `meta` y `valor` de la petición de documentos, cada uno
    /// unido por comas y emparejado posicionalmente. `None` si no hay
    /// ningún filtro activo (listado sin filtrar).
    pub fn parametros(&self) -> Option<(String, String)> {
        if self.seleccion.is_empty() {
            return None;
        }
        let metas: Vec<&str> = self.seleccion.keys().map(String::as_str).collect();
        let valores: Vec<&str> = self.seleccion.values().map(String::as_str).collect();
        Some((metas.join(","), valores.join(",")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn un_filtro_simple_genera_el_par_meta_valor() {
        let mut filtro = FiltroMetadatos::default();
        filtro.fijar("Área", "Medicina");

        let (metas, valores) = filtro.parametros().unwrap();
        assert_eq!(metas, "Área");
        assert_eq!(valores, "Medicina");
    }

    #[test]
    fn volver_al_comodin_deja_el_filtro_vacio() {
        let mut filtro = FiltroMetadatos::default();
        filtro.fijar("Área", "Medicina");
        filtro.fijar("Área", "");

        assert!(filtro.esta_vacio());
        assert!(filtro.parametros().is_none());
    }

    #[test]
    fn varios_filtros_quedan_emparejados_posicionalmente() {
        let mut filtro = FiltroMetadatos::default();
        filtro.fijar("Lengua", "Español");
        filtro.fijar("Área", "Historia");

        let (metas, valores) = filtro.parametros().unwrap();
        let metas: Vec<&str> = metas.split(',').collect();
        let valores: Vec<&str> = valores.split(',').collect();
        assert_eq!(metas.len(), valores.len());

        let pos_area = metas.iter().position(|m| *m == "Área").unwrap();
        let pos_lengua = metas.iter().position(|m| *m == "Lengua").unwrap();
        assert_eq!(valores[pos_area], "Historia");
        assert_eq!(valores[pos_lengua], "Español");
    }

    #[test]
    fn cambiar_un_metadato_conserva_los_demas() {
        let mut filtro = FiltroMetadatos::default();
        filtro.fijar("Área", "Medicina");
        filtro.fijar("Lengua", "Español");
        filtro.fijar("Área", "COVID");

        assert_eq!(filtro.valor_de("Área"), Some("COVID"));
        assert_eq!(filtro.valor_de("Lengua"), Some("Español"));
    }
}
