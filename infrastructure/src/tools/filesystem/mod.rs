//! Filesystem tools operating inside a site's plugins directory
//!
//! - [`plugins`]: list plugin directories and the files of one plugin
//! - [`block_file`]: edit source files of a Gutenberg block plugin
//! - [`block_json`]: edit a block's `block.json` (with confirmation)
//!
//! Paths coming from the client are always relative to the plugins
//! directory; absolute paths and `..` components are rejected.

pub mod block_file;
pub mod block_json;
pub mod plugins;

use std::path::{Component, Path, PathBuf};

use serde_json::Value;
use wpmcp_domain::tool::ToolError;

pub use block_file::EditBlockFileTool;
pub use block_json::EditBlockJsonTool;
pub use plugins::{ListAvailablePluginsTool, ListPluginFilesTool};

/// npm packages whose presence marks a package as a Gutenberg block
const BLOCK_PACKAGES: [&str; 2] = ["@wordpress/blocks", "@wordpress/block-editor"];

/// Whether `dir` holds a Gutenberg block plugin.
///
/// True when its `package.json` depends on `@wordpress/blocks` or
/// `@wordpress/block-editor` (regular or dev dependency), or declares a
/// `blockEditor` field. Unreadable or malformed manifests count as "no".
pub async fn is_gutenberg_block(dir: &Path) -> bool {
    let Ok(raw) = tokio::fs::read_to_string(dir.join("package.json")).await else {
        return false;
    };
    let Ok(manifest) = serde_json::from_str::<Value>(&raw) else {
        tracing::debug!(dir = %dir.display(), "package.json is not valid JSON");
        return false;
    };

    let depends_on_blocks = ["dependencies", "devDependencies"].iter().any(|section| {
        manifest
            .get(section)
            .and_then(Value::as_object)
            .is_some_and(|deps| BLOCK_PACKAGES.iter().any(|pkg| deps.contains_key(*pkg)))
    });

    depends_on_blocks || manifest.get("blockEditor").is_some()
}

/// Names of the directories directly under `plugins_path`, sorted
pub async fn plugin_directories(plugins_path: &Path) -> std::io::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(plugins_path).await?;
    let mut directories = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_dir() {
            directories.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    directories.sort();
    Ok(directories)
}

/// Validate a client-supplied path that must stay below its base directory.
pub(crate) fn relative_path<'a>(param: &str, value: &'a str) -> Result<&'a Path, ToolError> {
    let path = Path::new(value);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(ToolError::invalid_argument(format!(
            "{} must be a path relative to the plugin directory without \"..\": {}",
            param, value
        )));
    }
    Ok(path)
}

/// `{plugins_path}/{dirname}` for a block plugin, checked to be a Gutenberg block.
pub(crate) async fn block_plugin_dir(
    plugins_path: &Path,
    dirname: &str,
) -> Result<PathBuf, ToolError> {
    let block_dir = plugins_path.join(relative_path("blockPluginDirname", dirname)?);
    if !is_gutenberg_block(&block_dir).await {
        return Err(ToolError::execution_failed(format!(
            "directory {} does not contain a Gutenberg block. Are you sure {} is valid?",
            block_dir.display(),
            block_dir.display()
        )));
    }
    Ok(block_dir)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_is_gutenberg_block_by_dependency() {
        let plugins = tempfile::tempdir().unwrap();
        let dir = test_support::create_block_plugin(plugins.path(), "my-block");
        assert!(is_gutenberg_block(&dir).await);
    }

    #[tokio::test]
    async fn test_is_gutenberg_block_by_dev_dependency_or_field() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{ "devDependencies": { "@wordpress/block-editor": "*" } }"#,
        )
        .unwrap();
        assert!(is_gutenberg_block(dir.path()).await);

        std::fs::write(dir.path().join("package.json"), r#"{ "blockEditor": {} }"#).unwrap();
        assert!(is_gutenberg_block(dir.path()).await);
    }

    #[tokio::test]
    async fn test_not_a_gutenberg_block() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_gutenberg_block(dir.path()).await);

        std::fs::write(
            dir.path().join("package.json"),
            r#"{ "dependencies": { "react": "^18" } }"#,
        )
        .unwrap();
        assert!(!is_gutenberg_block(dir.path()).await);

        std::fs::write(dir.path().join("package.json"), "not json").unwrap();
        assert!(!is_gutenberg_block(dir.path()).await);
    }

    #[tokio::test]
    async fn test_plugin_directories_sorted_and_dirs_only() {
        let plugins = tempfile::tempdir().unwrap();
        std::fs::create_dir(plugins.path().join("zeta")).unwrap();
        std::fs::create_dir(plugins.path().join("akismet")).unwrap();
        std::fs::write(plugins.path().join("hello.php"), "<?php").unwrap();

        let dirs = plugin_directories(plugins.path()).await.unwrap();
        assert_eq!(dirs, vec!["akismet", "zeta"]);
    }

    #[test]
    fn test_relative_path_rejects_escapes() {
        assert!(relative_path("filePath", "src/edit.js").is_ok());
        assert!(relative_path("filePath", "./src/edit.js").is_ok());

        let err = relative_path("filePath", "../other/edit.js").unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(relative_path("filePath", "/etc/passwd").is_err());
    }

    #[tokio::test]
    async fn test_block_plugin_dir_requires_block() {
        let plugins = tempfile::tempdir().unwrap();
        std::fs::create_dir(plugins.path().join("plain")).unwrap();

        let err = block_plugin_dir(plugins.path(), "plain")
            .await
            .unwrap_err();
        assert_eq!(err.code, ToolError::EXECUTION_FAILED);
        assert!(err.message.starts_with("directory "));
        assert!(err.message.contains("does not contain a Gutenberg block"));
    }
}
