//! The `aula init` command.

use std::path::Path;

use anyhow::{Context, Result};

use aula_core::model::CoursesDocument;
use aula_core::{DocumentStore, PortalConfig};

pub fn execute(config: &PortalConfig) -> Result<()> {
    if Path::new("aula.toml").exists() {
        println!("aula.toml already exists, skipping.");
    } else {
        std::fs::write("aula.toml", SAMPLE_CONFIG)?;
        println!("Created aula.toml");
    }

    let store = DocumentStore::new(config.data_dir.clone());
    let courses_path = store.path_of(&config.courses_file);
    if courses_path.exists() {
        println!("{} already exists, skipping.", courses_path.display());
    } else {
        let sample: CoursesDocument =
            serde_json::from_str(SAMPLE_COURSES).context("sample courses are invalid")?;
        store.save(&config.courses_file, &sample)?;
        println!("Created {}", courses_path.display());
    }

    println!("\nNext steps:");
    println!("  1. Run: aula register --username <name> --password <password>");
    println!("  2. Run: aula login --username <name> --password <password>");
    println!("  3. Run: aula courses");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# aula configuration

data_dir = "./data"
users_file = "users.json"
courses_file = "courses.json"
session_file = "session.json"
"#;

const SAMPLE_COURSES: &str = r#"{
  "courses": [
    {
      "slug": "python-basico",
      "title": "Python básico",
      "description": "Primeros pasos con Python",
      "topics": [
        {
          "slug": "variables",
          "title": "Variables y tipos",
          "contenido": "Una variable es un nombre que guarda un valor. En Python no se declara el tipo: x = 10 crea un entero y nombre = \"Ana\" crea una cadena.",
          "quiz": [
            {
              "pregunta": "¿Qué tipo tiene x después de x = 10?",
              "opciones": ["str", "int", "float"],
              "respuesta": 1
            },
            {
              "pregunta": "¿Hace falta declarar el tipo de una variable?",
              "opciones": ["Sí", "No"],
              "respuesta": 1
            }
          ]
        },
        {
          "slug": "bucles",
          "title": "Bucles",
          "contenido": "bucles.html",
          "quiz": [
            {
              "pregunta": "¿Qué palabra clave recorre una secuencia?",
              "opciones": ["for", "if", "def"],
              "respuesta": 0
            }
          ]
        }
      ]
    }
  ]
}"#;
