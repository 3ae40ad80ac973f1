// Módulos de la aplicación
mod backend;
mod config;
mod controller;
mod filters;
mod models;
mod selection;
mod session;
mod view;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::backend::HttpBackend;
use crate::controller::{Controlador, Procesado, SesionError};
use crate::models::Corpus;
use crate::view::{linea_nodo, linea_resultado, ResumenGrafo, VistaDocumentos};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Cargar .env e inicializar logging
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 2. Cargar configuración y crear el controlador de sesión
    let cfg = config::AppConfig::from_env()?;
    info!("🔌 Backend en {}", cfg.backend_url);
    let mut ctl = Controlador::new(HttpBackend::new(&cfg.backend_url));

    println!("Cliente de corpus y diccionarios. Escribe 'ayuda' para ver los comandos.");

    // 3. Bucle interactivo: cada transición de estado re-proyecta la vista
    let stdin = io::stdin();
    let mut ultima_lista_corpora: Vec<Corpus> = Vec::new();

    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut linea = String::new();
        if stdin.lock().read_line(&mut linea)? == 0 {
            break;
        }
        let linea = linea.trim();
        let (comando, resto) = match linea.split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (linea, ""),
        };

        let salida = match comando {
            "" => Ok(()),
            "ayuda" => {
                imprimir_ayuda();
                Ok(())
            }
            "corpora" => match ctl.listar_corpora().await {
                Ok(lista) => {
                    for c in &lista {
                        println!("  [{}] {}", c.id, c.nombre);
                    }
                    ultima_lista_corpora = lista;
                    Ok(())
                }
                Err(e) => Err(e),
            },
            "usar" => match resto.parse::<i64>() {
                Ok(id) => match ultima_lista_corpora.iter().find(|c| c.id == id) {
                    Some(corpus) => ctl
                        .activar_corpus(corpus.clone())
                        .await
                        .map(|vista| imprimir_documentos(&vista)),
                    None => {
                        println!("Corpus desconocido; lista primero con 'corpora'.");
                        Ok(())
                    }
                },
                Err(_) => {
                    println!("Uso: usar <id de corpus>");
                    Ok(())
                }
            },
            "filtro" => match resto.split_once(' ') {
                Some((metadato, valor)) => {
                    let valor = if valor.trim() == "-" { "" } else { valor.trim() };
                    match ctl.cambiar_filtro(metadato, valor).await {
                        Ok(Some(vista)) => {
                            imprimir_documentos(&vista);
                            Ok(())
                        }
                        Ok(None) => Ok(()), // respuesta superada, descartada
                        Err(e) => Err(e),
                    }
                }
                None => {
                    println!("Uso: filtro <metadato> <valor | - para el comodín>");
                    Ok(())
                }
            },
            "docs" => {
                imprimir_documentos(&ctl.vista_documentos());
                Ok(())
            }
            "estado" => {
                let estado = &ctl.sesion.estado;
                if estado.ocupado {
                    println!("  (operación en curso)");
                }
                if !estado.mensaje.is_empty() {
                    println!("  {}", estado.mensaje);
                }
                match &ctl.sesion.diccionario_activo {
                    Some(d) => println!("  Diccionario activo: {d}"),
                    None => println!("  Ninguno cargado."),
                }
                for r in &ctl.sesion.resultados {
                    println!("  {}", linea_resultado(r));
                }
                Ok(())
            }
            "marcar" => match resto.parse::<i64>() {
                Ok(id) => {
                    ctl.alternar_documento(id);
                    imprimir_documentos(&ctl.vista_documentos());
                    Ok(())
                }
                Err(_) => {
                    println!("Uso: marcar <id de documento>");
                    Ok(())
                }
            },
            "visibles+" => {
                ctl.seleccionar_visibles();
                imprimir_documentos(&ctl.vista_documentos());
                Ok(())
            }
            "visibles-" => {
                ctl.deseleccionar_visibles();
                imprimir_documentos(&ctl.vista_documentos());
                Ok(())
            }
            "procesar" => match ctl.procesar(resto).await {
                Ok(Procesado::Cancelado) => {
                    println!("Procesado cancelado: hace falta un nombre de diccionario.");
                    Ok(())
                }
                Ok(Procesado::Guardado { mensaje, resumen }) => {
                    println!("✅ {mensaje}");
                    imprimir_resumen(&resumen);
                    // Como en la interfaz web, guardar lleva al buscador:
                    // el catálogo se consulta de nuevo al entrar.
                    listar_diccionarios(&ctl).await
                }
                Err(e) => Err(e),
            },
            "diccionarios" => listar_diccionarios(&ctl).await,
            "cargar" => match ctl.cargar_diccionario(resto).await {
                Ok(Some(resumen)) => {
                    println!("Diccionario activo: {resto}");
                    imprimir_resumen(&resumen);
                    listar_diccionarios(&ctl).await
                }
                Ok(None) => Ok(()),
                Err(e) => Err(e),
            },
            "eliminar" => {
                let confirmado = confirmar(&format!("¿Eliminar \"{resto}\"?"), &stdin)?;
                match ctl.eliminar_diccionario(resto, confirmado).await {
                    Ok(Some(lista)) => {
                        println!("Diccionario eliminado.");
                        imprimir_catalogo(&lista);
                        Ok(())
                    }
                    Ok(None) => Ok(()),
                    Err(e) => Err(e),
                }
            }
            "buscar" => match ctl.buscar(resto).await {
                Ok(resultados) => {
                    if resultados.is_empty() {
                        println!("Sin resultados.");
                    }
                    for r in &resultados {
                        println!("  {}", linea_resultado(r));
                    }
                    Ok(())
                }
                Err(e) => Err(e),
            },
            "grafo" => {
                match &ctl.sesion.grafo {
                    Some(grafo) => imprimir_resumen(&view::resumen_grafo(grafo)),
                    None => println!("Ninguno cargado."),
                }
                Ok(())
            }
            "salir" => break,
            otro => {
                println!("Comando desconocido: {otro}. Escribe 'ayuda'.");
                Ok(())
            }
        };

        if let Err(e) = salida {
            match e {
                SesionError::Validacion(mensaje) => println!("⚠ {mensaje}"),
                SesionError::Backend(e) => println!("{e}"),
            }
        }
    }

    info!("✅ Sesión terminada.");
    Ok(())
}

fn imprimir_ayuda() {
    println!("Comandos:");
    println!("  corpora                      listar corpus disponibles");
    println!("  usar <id>                    activar un corpus");
    println!("  filtro <metadato> <valor|->  fijar un filtro ('-' = cualquiera)");
    println!("  docs                         volver a mostrar la lista de documentos");
    println!("  estado                       mostrar el estado de la sesión");
    println!("  marcar <id>                  alternar la selección de un documento");
    println!("  visibles+ / visibles-        seleccionar / deseleccionar los visibles");
    println!("  procesar <nombre>            construir un diccionario con la selección");
    println!("  diccionarios                 listar diccionarios guardados");
    println!("  cargar <nombre>              cargar un diccionario guardado");
    println!("  eliminar <nombre>            eliminar un diccionario (pide confirmación)");
    println!("  buscar <definición>          buscar términos por definición");
    println!("  grafo                        volver a mostrar el resumen del grafo");
    println!("  salir");
}

fn imprimir_documentos(vista: &VistaDocumentos) {
    for control in &vista.controles {
        let elegido = control.elegido.as_deref().unwrap_or("--Cualquiera--");
        println!("  [{}: {}] valores: {}", control.nombre, elegido, control.valores.join(", "));
    }
    if vista.sin_documentos() {
        println!("  No hay documentos.");
    }
    for fila in &vista.filas {
        let marca = if fila.seleccionado { "x" } else { " " };
        println!("  [{marca}] {} {}", fila.id, fila.archivo);
    }
    if vista.total_seleccionados > 0 {
        println!("  {} documentos seleccionados.", vista.total_seleccionados);
    }
}

fn imprimir_resumen(resumen: &ResumenGrafo) {
    println!("  Nodos: {} — Aristas: {}", resumen.total_nodos, resumen.total_aristas);
    for nodo in &resumen.muestra {
        println!("    {}", linea_nodo(nodo));
    }
}

fn imprimir_catalogo(lista: &[crate::models::DiccionarioInfo]) {
    if lista.is_empty() {
        println!("  No hay diccionarios guardados.");
    }
    for d in lista {
        println!("  - {}", d.nombre);
    }
}

async fn listar_diccionarios(ctl: &Controlador<HttpBackend>) -> Result<(), SesionError> {
    let lista = ctl.listar_diccionarios().await?;
    imprimir_catalogo(&lista);
    Ok(())
}

fn confirmar(pregunta: &str, stdin: &io::Stdin) -> Result<bool> {
    print!("{pregunta} (s/n) ");
    io::stdout().flush()?;
    let mut respuesta = String::new();
    stdin.lock().read_line(&mut respuesta)?;
    Ok(respuesta.trim().eq_ignore_ascii_case("s"))
}
