//! JSON documents on disk with a read-modify-write update workflow.

use crate::capability::{FileOps, PathBacked};
use crate::error::{FsError, Result};
use crate::path::FsPath;
use crate::text::{TextFile, TextOptions};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use tracing::debug;

type Transform = Box<dyn Fn(Value) -> Value + Send + Sync>;

/// Serialization options for [`JsonFile::write_from_json_with`].
#[derive(Default)]
pub struct JsonWriteOptions {
    pretty: bool,
    fields: Option<Vec<String>>,
    transform: Option<Transform>,
}

impl JsonWriteOptions {
    /// Indent the output.
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Only serialize these top-level fields of an object value.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Rewrite the serialized value before it is written.
    pub fn transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.transform = Some(Box::new(transform));
        self
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        let mut value = serde_json::to_value(value)?;
        if let Some(transform) = &self.transform {
            value = transform(value);
        }
        if let (Some(fields), Value::Object(map)) = (&self.fields, &mut value) {
            map.retain(|key, _| fields.iter().any(|field| field == key));
        }
        let text = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(text)
    }
}

impl fmt::Debug for JsonWriteOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonWriteOptions")
            .field("pretty", &self.pretty)
            .field("fields", &self.fields)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

/// Shallow-merge `patch` onto `base`: keys in `patch` overwrite, all other
/// keys of `base` are kept.
///
/// Returns false, leaving `base` untouched, unless both are objects.
pub fn shallow_merge(base: &mut Value, patch: Value) -> bool {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            base.extend(patch);
            true
        }
        _ => false,
    }
}

/// A UTF-8 JSON file whose payload decodes to `T`.
///
/// No shape invariant is enforced on `T` beyond what serde decoding does.
pub struct JsonFile<T> {
    text: TextFile,
    _payload: PhantomData<fn() -> T>,
}

impl<T> JsonFile<T> {
    pub fn new(path: impl Into<FsPath>) -> Self {
        Self {
            text: TextFile::new(path),
            _payload: PhantomData,
        }
    }

    /// The underlying text view of this file.
    pub fn as_text_file(&self) -> &TextFile {
        &self.text
    }
}

impl<T: Serialize + DeserializeOwned> JsonFile<T> {
    /// Write `value` to a new file at `path`, creating parent directories.
    pub async fn create_from_json(path: impl Into<FsPath>, value: &T) -> Result<Self> {
        let file = Self::new(path);
        file.ensure_parent_directory_exists().await?;
        file.write_from_json(value).await?;
        Ok(file)
    }

    /// Read and decode the file.
    ///
    /// Malformed JSON is returned as `FsError::Json`; there is no partial
    /// recovery.
    pub async fn read_as_json(&self) -> Result<T> {
        let text = self.text.read_as_text().await?;
        serde_json::from_str(&text).map_err(|e| FsError::json(self.fs_path().to_path_buf(), e))
    }

    /// Serialize `value` compactly and replace the file's content.
    pub async fn write_from_json(&self, value: &T) -> Result<()> {
        self.write_from_json_with(value, &JsonWriteOptions::default())
            .await
    }

    pub async fn write_from_json_with(&self, value: &T, options: &JsonWriteOptions) -> Result<()> {
        let text = options.render(value)?;
        self.text
            .write_from_text_with(&text, TextOptions::default())
            .await
    }

    /// Read the current value, replace it with `updater(old)`, and return
    /// the new value.
    ///
    /// If the updater fails, nothing is written and its error is returned.
    ///
    /// This is a read-modify-write cycle, not a transaction. No lock is held
    /// between the read and the write, so concurrent updaters (in this
    /// process or another one) race and the last write wins. Callers that
    /// need stronger guarantees must serialize access themselves.
    pub async fn update_json<F, Fut, E>(&self, updater: F) -> std::result::Result<T, E>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: From<FsError>,
    {
        let old_value = self.read_as_json().await?;
        let new_value = updater(old_value).await?;
        self.write_from_json(&new_value).await?;
        debug!("Updated JSON document at {}", self.fs_path());
        Ok(new_value)
    }

    /// Shallow-merge the serialized `patch` onto the stored object.
    ///
    /// Keys absent from the serialized patch are preserved. Fields the
    /// serializer omits (such as `None` with `skip_serializing_if`) never
    /// overwrite stored values. Shares the race described on
    /// [`JsonFile::update_json`].
    pub async fn patch_json<P: Serialize>(&self, patch: &P) -> Result<T> {
        let patch = serde_json::to_value(patch)?;
        let path = self.fs_path().to_path_buf();

        self.update_json(move |old| async move {
            let mut merged = serde_json::to_value(&old)?;
            if !shallow_merge(&mut merged, patch) {
                return Err(FsError::NotAnObject { path });
            }
            serde_json::from_value(merged).map_err(|e| FsError::json(path, e))
        })
        .await
    }
}

impl<T> Clone for JsonFile<T> {
    fn clone(&self) -> Self {
        Self {
            text: self.text.clone(),
            _payload: PhantomData,
        }
    }
}

impl<T> fmt::Debug for JsonFile<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonFile")
            .field("path", self.text.fs_path())
            .field("payload", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> PartialEq for JsonFile<T> {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl<T> PathBacked for JsonFile<T> {
    fn fs_path(&self) -> &FsPath {
        self.text.fs_path()
    }

    fn with_path(&self, path: FsPath) -> Self {
        Self::new(path)
    }
}

impl<T> FileOps for JsonFile<T> {}
