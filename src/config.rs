//! Carga y gestión de configuración de la aplicación.

use std::env;

use anyhow::{anyhow, Result};
use url::Url;

/// Configuración completa de la aplicación.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// URL base del backend de corpus y diccionarios, sin barra final.
    /// Todas las rutas `/api/...` se resuelven relativas a ella, de modo
    /// que la aplicación funciona también servida bajo un sub-path.
    pub backend_url: String,
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno (usando .env si existe).
    pub fn from_env() -> Result<Self> {
        let backend_url =
            env::var("BACKEND_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());

        // Validar que la URL sea absoluta antes de empezar la sesión.
        Url::parse(&backend_url)
            .map_err(|e| anyhow!("BACKEND_URL no es una URL válida ({backend_url}): {e}"))?;

        Ok(Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn la_url_base_pierde_la_barra_final() {
        std::env::set_var("BACKEND_URL", "http://localhost:5000/c3/");
        let cfg = AppConfig::from_env().unwrap();
        assert_eq!(cfg.backend_url, "http://localhost:5000/c3");
        std::env::remove_var("BACKEND_URL");
    }
}
