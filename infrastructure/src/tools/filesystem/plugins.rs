//! Plugin directory listing tools

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use wpmcp_application::ports::tool_handler::{ToolContext, ToolHandler};
use wpmcp_domain::tool::{ToolCall, ToolCategory, ToolDefinition, ToolError, ToolParameter, ToolResult};

use super::{plugin_directories, relative_path};

pub const LIST_PLUGIN_FILES: &str = "wp_list_plugin_files";
pub const LIST_AVAILABLE_PLUGINS: &str = "wp_list_available_plugins_in_site_plugins_path";

/// Directories never descended into when listing plugin files
const SKIPPED_DIRS: [&str; 1] = ["node_modules"];

/// `wp_list_available_plugins_in_site_plugins_path`
pub struct ListAvailablePluginsTool;

#[async_trait]
impl ToolHandler for ListAvailablePluginsTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            LIST_AVAILABLE_PLUGINS,
            "List a plugins directories which is equivalent of listing available plugins for site",
            ToolCategory::Filesystem,
        )
    }

    async fn execute(
        &self,
        _call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let plugins_path = &context.site.plugins_path;
        let directories = list_plugins_path(plugins_path).await?;

        Ok(ToolResult::text(format!(
            "Available plugins directories in {}:\n\n{}",
            plugins_path.display(),
            directories.join("\n")
        ))
        .with_field("directories", directories))
    }
}

async fn list_plugins_path(plugins_path: &Path) -> Result<Vec<String>, ToolError> {
    if !tokio::fs::try_exists(plugins_path).await.unwrap_or(false) {
        return Err(ToolError::new(
            ToolError::NOT_FOUND,
            format!(
                "directory {} not exists. Please review a plugin directory and site configuration.",
                plugins_path.display()
            ),
        ));
    }
    plugin_directories(plugins_path).await.map_err(|e| {
        ToolError::execution_failed(format!(
            "Failed to read {}: {}",
            plugins_path.display(),
            e
        ))
    })
}

/// `wp_list_plugin_files`
pub struct ListPluginFilesTool;

#[async_trait]
impl ToolHandler for ListPluginFilesTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            LIST_PLUGIN_FILES,
            "List a files for a specified plugin directory",
            ToolCategory::Filesystem,
        )
        .with_parameter(ToolParameter::new("pluginDirName", "Plugin directory name", true))
    }

    async fn execute(
        &self,
        call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let dirname = call
            .require_string("pluginDirName")
            .map_err(ToolError::invalid_argument)?;
        if dirname.is_empty() || dirname == "." {
            return Err(ToolError::invalid_argument(
                "pluginDirName cannot be \".\" or empty (self directory).",
            ));
        }

        let plugins_path = &context.site.plugins_path;
        let plugin_dir = plugins_path.join(relative_path("pluginDirName", dirname)?);

        if !tokio::fs::try_exists(&plugin_dir).await.unwrap_or(false) {
            let directories = list_plugins_path(plugins_path).await?;
            return Ok(ToolResult::text(format!(
                "Directory {} not exists. Please review a plugin directory. Available plugins in {}:\n\n{}",
                plugin_dir.display(),
                plugins_path.display(),
                directories.join("\n")
            ))
            .with_field("directories", directories));
        }

        let files: Vec<String> = list_files(&plugin_dir)
            .await
            .map_err(|e| ToolError::execution_failed(e.to_string()))?
            .into_iter()
            .map(|p| p.display().to_string())
            .collect();

        Ok(ToolResult::text(format!(
            "Files at {}:\n\n{}",
            plugin_dir.display(),
            files.join("\n")
        ))
        .with_field("files", files))
    }
}

/// All files below `root` (depth-first, sorted per directory), skipping `node_modules`
async fn list_files(root: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = Vec::new();
        let mut read_dir = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = read_dir.next_entry().await? {
            entries.push(entry);
        }
        entries.sort_by_key(|e| e.file_name());

        let mut subdirs = Vec::new();
        for entry in entries {
            let path = entry.path();
            if entry.file_type().await?.is_dir() {
                let name = entry.file_name();
                let skipped = SKIPPED_DIRS.iter().any(|s| name.to_str() == Some(*s));
                if !skipped {
                    subdirs.push(path);
                }
            } else {
                files.push(path);
            }
        }
        // Reverse so the stack pops subdirectories in name order
        pending.extend(subdirs.into_iter().rev());
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wpmcp_domain::Site;

    fn site(plugins: &Path) -> Site {
        Site::new("Blog", "/srv/blog", plugins, "http://blog.test/wp-json")
    }

    #[tokio::test]
    async fn test_list_available_plugins() {
        let plugins = tempfile::tempdir().unwrap();
        std::fs::create_dir(plugins.path().join("my-block")).unwrap();
        std::fs::create_dir(plugins.path().join("akismet")).unwrap();
        let site = site(plugins.path());
        let context = ToolContext::new("blog", &site);

        let result = ListAvailablePluginsTool
            .execute(&ToolCall::new(LIST_AVAILABLE_PLUGINS), &context)
            .await
            .unwrap();

        assert_eq!(
            result.text_content(),
            format!(
                "Available plugins directories in {}:\n\nakismet\nmy-block",
                plugins.path().display()
            )
        );
        assert_eq!(
            result.structured["directories"],
            serde_json::json!(["akismet", "my-block"])
        );
    }

    #[tokio::test]
    async fn test_list_available_plugins_missing_path() {
        let site = site(Path::new("/nonexistent/wpmcp/plugins"));
        let context = ToolContext::new("blog", &site);

        let err = ListAvailablePluginsTool
            .execute(&ToolCall::new(LIST_AVAILABLE_PLUGINS), &context)
            .await
            .unwrap_err();
        assert_eq!(err.code, ToolError::NOT_FOUND);
        assert!(err.message.contains("/nonexistent/wpmcp/plugins not exists"));
    }

    #[tokio::test]
    async fn test_list_plugin_files_skips_node_modules() {
        let plugins = tempfile::tempdir().unwrap();
        let plugin = plugins.path().join("my-block");
        std::fs::create_dir_all(plugin.join("src")).unwrap();
        std::fs::create_dir_all(plugin.join("node_modules/react")).unwrap();
        std::fs::write(plugin.join("package.json"), "{}").unwrap();
        std::fs::write(plugin.join("src/edit.js"), "").unwrap();
        std::fs::write(plugin.join("node_modules/react/index.js"), "").unwrap();

        let site = site(plugins.path());
        let context = ToolContext::new("blog", &site);
        let call = ToolCall::new(LIST_PLUGIN_FILES).with_arg("pluginDirName", "my-block");
        let result = ListPluginFilesTool.execute(&call, &context).await.unwrap();

        let files = result.structured["files"].as_array().unwrap();
        let files: Vec<&str> = files.iter().map(|f| f.as_str().unwrap()).collect();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("package.json"));
        assert!(files[1].ends_with("src/edit.js"));
        assert!(result.text_content().starts_with("Files at "));
        assert!(!result.text_content().contains("node_modules"));
    }

    #[tokio::test]
    async fn test_list_plugin_files_missing_dir_lists_plugins() {
        let plugins = tempfile::tempdir().unwrap();
        std::fs::create_dir(plugins.path().join("akismet")).unwrap();
        let site = site(plugins.path());
        let context = ToolContext::new("blog", &site);

        let call = ToolCall::new(LIST_PLUGIN_FILES).with_arg("pluginDirName", "missing");
        let result = ListPluginFilesTool.execute(&call, &context).await.unwrap();

        assert!(!result.is_error());
        assert!(result.text_content().contains("not exists. Please review a plugin directory."));
        assert_eq!(result.structured["directories"], serde_json::json!(["akismet"]));
    }

    #[tokio::test]
    async fn test_list_plugin_files_rejects_self_directory() {
        let plugins = tempfile::tempdir().unwrap();
        let site = site(plugins.path());
        let context = ToolContext::new("blog", &site);

        for dirname in [".", ""] {
            let call = ToolCall::new(LIST_PLUGIN_FILES).with_arg("pluginDirName", dirname);
            let err = ListPluginFilesTool.execute(&call, &context).await.unwrap_err();
            assert!(err.is_invalid_argument());
            assert_eq!(
                err.message,
                "pluginDirName cannot be \".\" or empty (self directory)."
            );
        }

        let call = ToolCall::new(LIST_PLUGIN_FILES).with_arg("pluginDirName", "../..");
        let err = ListPluginFilesTool.execute(&call, &context).await.unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
