use crate::io::atomic_write_str;
use crate::paths::{ConfigError, LiveLinkPaths};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use toml_edit::{DocumentMut, Item};

/// Lectura y escritura de secciones `[section]` del fichero de configuración.
pub trait ConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError>;
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;
}

#[derive(Debug, Clone)]
pub struct TomlConfigBackend {
  paths: LiveLinkPaths,
}

impl TomlConfigBackend {
  pub fn new(paths: LiveLinkPaths) -> Self {
    Self { paths }
  }

  pub fn paths(&self) -> &LiveLinkPaths {
    &self.paths
  }

  /// Como `load_section`, pero un fichero o sección ausente da `T::default()`.
  pub fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    let Some(content) = self.read_config()? else {
      return Ok(T::default());
    };

    let toml_val: toml::Value = toml::from_str(&content)?;
    match toml_val.get(section) {
      Some(table) => decode_section(section, table),
      None => Ok(T::default()),
    }
  }

  /// Carga la sección o, si falta, escribe los valores por defecto para que el
  /// usuario tenga un fichero que editar.
  pub fn load_or_init_section<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Serialize + Default,
  {
    let value: T = self.load_section_with_default(section)?;
    if !self.has_section(section)? {
      self.save_section(section, &value)?;
    }
    Ok(value)
  }

  fn has_section(&self, section: &str) -> Result<bool, ConfigError> {
    let Some(content) = self.read_config()? else {
      return Ok(false);
    };
    let toml_val: toml::Value = toml::from_str(&content)?;
    Ok(toml_val.get(section).is_some())
  }

  fn read_config(&self) -> Result<Option<String>, ConfigError> {
    match fs::read_to_string(self.paths.config_file()) {
      Ok(content) => Ok(Some(content)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }
}

fn decode_section<T: DeserializeOwned>(section: &str, table: &toml::Value) -> Result<T, ConfigError> {
  table.clone().try_into().map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
    let path = self.paths.config_file();
    let content = fs::read_to_string(&path)?;
    let toml_val: toml::Value = toml::from_str(&content)?;

    let table = toml_val
      .get(section)
      .ok_or_else(|| ConfigError::Other(format!("missing section [{section}] in {:?}", path)))?;

    decode_section(section, table)
  }

  /// Reemplaza sólo `[section]`; comentarios y demás secciones se conservan.
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    let path = self.paths.config_file();

    let mut doc: DocumentMut = match self.read_config()? {
      Some(content) => content.parse::<DocumentMut>().map_err(|e| ConfigError::Other(format!("parse toml_edit doc: {e}")))?,
      None => DocumentMut::new(),
    };

    let section_str =
      toml::to_string(value).map_err(|e| ConfigError::Other(format!("encode section [{section}]: {e}")))?;

    // `section_str` es una tabla sin cabecera ("foo = 1\nbar = 2\n").
    let section_item: Item = section_str
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse section as doc: {e}")))?
      .into_item();

    doc[section] = section_item;

    atomic_write_str(&path, &doc.to_string())?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde::Deserialize;
  use tempfile::tempdir;

  #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
  struct Share {
    slug_length: usize,
    public_base_url: String,
  }

  fn backend() -> (tempfile::TempDir, TomlConfigBackend) {
    let tmp = tempdir().unwrap();
    let paths = LiveLinkPaths::at(tmp.path()).unwrap();
    (tmp, TomlConfigBackend::new(paths))
  }

  #[test]
  fn missing_file_gives_defaults() {
    let (_tmp, backend) = backend();

    let share: Share = backend.load_section_with_default("share").unwrap();

    assert_eq!(share, Share::default());
    assert!(backend.load_section::<Share>("share").is_err());
  }

  #[test]
  fn save_section_keeps_comments_and_other_sections() {
    let (_tmp, backend) = backend();
    let path = backend.paths().config_file();
    fs::write(&path, "# band settings\n[band]\nname = \"Kinoko\"\n").unwrap();

    let share = Share { slug_length: 10, public_base_url: "https://example.test".into() };
    backend.save_section("share", &share).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("# band settings"));
    assert!(written.contains("name = \"Kinoko\""));
    assert_eq!(backend.load_section::<Share>("share").unwrap(), share);
  }

  #[test]
  fn load_or_init_writes_missing_section() {
    let (_tmp, backend) = backend();

    let share: Share = backend.load_or_init_section("share").unwrap();

    assert_eq!(share, Share::default());
    assert!(backend.has_section("share").unwrap());
  }

  #[test]
  fn malformed_section_is_reported() {
    let (_tmp, backend) = backend();
    fs::write(backend.paths().config_file(), "[share]\nslug_length = \"eight\"\n").unwrap();

    let err = backend.load_section_with_default::<Share>("share").unwrap_err();

    assert!(err.to_string().contains("decode section [share]"));
  }
}
